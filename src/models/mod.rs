pub mod config;
pub mod options;
pub mod viewer;

pub use config::{AppConfig, PageConfig, SiteConfig};
pub use options::{sanitize_text_field, Adjustment, Flag, GrayscaleOptions, RawNumber, ResolvedOptions};
pub use viewer::{Viewer, ViewerRole, VIEWER_ROLE_HEADER};
