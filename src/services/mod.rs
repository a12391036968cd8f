pub mod markup;
pub mod page_service;
pub mod settings_provider;
pub mod shortcode;

pub use markup::{MarkupRenderer, TemplateError};
pub use page_service::PageService;
pub use settings_provider::{
    FileSettingsProvider, Settings, SettingsProvider, StaticSettingsProvider,
};
pub use shortcode::expand_toggles;
