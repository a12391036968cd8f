pub mod headers;
pub mod pages;
pub mod settings;
pub mod snippet;

pub use pages::{__path_handle_admin, __path_handle_home, __path_handle_page};
pub use pages::{handle_admin, handle_home, handle_page};
pub use settings::{handle_settings, SettingsResponse, __path_handle_settings};
pub use snippet::{handle_snippet, SnippetQuery, __path_handle_snippet};
