use crate::assets::AssetLoader;
use crate::error::SettingsError;
use crate::models::options::GrayscaleOptions;
use serde::Deserialize;

/// Settings loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Grayscale options (`enabled`, `intensity`, `apply_admin`, ...)
    #[serde(default)]
    pub grayscale: GrayscaleOptions,

    /// Pages served by the built-in site
    #[serde(default)]
    pub site: SiteConfig,
}

/// The demo site the filter is applied to
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Pages in navigation order; the first one is the front page
    #[serde(default = "default_pages")]
    pub pages: Vec<PageConfig>,
}

fn default_title() -> String {
    "Grayscale Mode".to_string()
}

fn default_pages() -> Vec<PageConfig> {
    vec![PageConfig {
        slug: "home".to_string(),
        title: "Home".to_string(),
        content: "<p>This site is shown in grayscale.</p>\n[grayscale_toggle]\n".to_string(),
    }]
}

/// One page of the site
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PageConfig {
    pub slug: String,
    pub title: String,

    /// Trusted HTML, may contain `[grayscale_toggle]` shortcodes
    #[serde(default)]
    pub content: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            pages: default_pages(),
        }
    }
}

impl SiteConfig {
    /// The page served at `/`
    pub fn front_page(&self) -> Option<&PageConfig> {
        self.pages.first()
    }

    /// Look up a page by slug
    pub fn page(&self, slug: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.slug == slug)
    }
}

impl AppConfig {
    /// Parse settings from YAML text
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load settings from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::debug!(pages = config.site.pages.len(), "Loaded settings");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read settings, using defaults");
                Self::default()
            }
        }
    }
}
