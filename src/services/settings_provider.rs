use grayscale_core::Configuration;
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::models::{Adjustment, AppConfig, SiteConfig};

/// An immutable snapshot of the settings for one render
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Configuration,
    pub site: SiteConfig,
    /// Values that were clamped or sanitized while resolving
    pub adjustments: Vec<Adjustment>,
    /// Where the settings came from
    pub source: String,
}

impl Settings {
    pub fn from_app_config(app: AppConfig, source: impl Into<String>) -> Self {
        let resolved = app.grayscale.resolve();
        Self {
            config: resolved.config,
            site: app.site,
            adjustments: resolved.adjustments,
            source: source.into(),
        }
    }
}

/// Trait for anything that hands out settings snapshots
pub trait SettingsProvider: Send + Sync {
    /// Fresh settings for the current request
    fn settings(&self) -> Settings;
}

/// Re-reads the settings file on every call, so edits apply on the next request
pub struct FileSettingsProvider {
    loader: Arc<AssetLoader>,
}

impl FileSettingsProvider {
    pub fn new(loader: Arc<AssetLoader>) -> Self {
        Self { loader }
    }
}

impl SettingsProvider for FileSettingsProvider {
    fn settings(&self) -> Settings {
        let app = AppConfig::load_from_assets(&self.loader);
        let settings = Settings::from_app_config(app, self.loader.config_source());
        for adjustment in &settings.adjustments {
            tracing::warn!(%adjustment, source = %settings.source, "Adjusted grayscale option");
        }
        settings
    }
}

/// Fixed settings, for tests and one-shot renders
pub struct StaticSettingsProvider {
    settings: Settings,
}

impl StaticSettingsProvider {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Wrap an already-resolved configuration and site
    pub fn from_parts(config: Configuration, site: SiteConfig) -> Self {
        Self::new(Settings {
            config,
            site,
            adjustments: Vec::new(),
            source: "static".to_string(),
        })
    }
}

impl SettingsProvider for StaticSettingsProvider {
    fn settings(&self) -> Settings {
        self.settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_provider_sees_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "grayscale:\n  intensity: 30\n").unwrap();

        let provider = FileSettingsProvider::new(Arc::new(AssetLoader::new(None, Some(path.clone()))));
        assert_eq!(provider.settings().config.intensity.percent(), 30);
        assert_eq!(provider.settings().source, path.display().to_string());

        fs::write(&path, "grayscale:\n  intensity: 70\n  enabled: 0\n").unwrap();
        let settings = provider.settings();
        assert_eq!(settings.config.intensity.percent(), 70);
        assert!(!settings.config.enabled);
    }

    #[test]
    fn test_file_provider_reports_adjustments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "grayscale:\n  intensity: 500\n").unwrap();

        let provider = FileSettingsProvider::new(Arc::new(AssetLoader::new(None, Some(path))));
        let settings = provider.settings();
        assert_eq!(settings.config.intensity.percent(), 100);
        assert_eq!(
            settings.adjustments,
            vec![Adjustment::IntensityClamped { from: 500, to: 100 }]
        );
    }

    #[test]
    fn test_static_provider() {
        let config = Configuration {
            apply_to_admin: true,
            ..Default::default()
        };
        let provider = StaticSettingsProvider::from_parts(config.clone(), SiteConfig::default());
        assert_eq!(provider.settings().config, config);
        assert_eq!(provider.settings().source, "static");
    }
}
