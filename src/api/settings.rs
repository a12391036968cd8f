use axum::{extract::State, response::Json};
use grayscale_core::Configuration;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::{Settings, SettingsProvider};

/// Resolved grayscale settings
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    /// Grayscale on the public site
    pub enabled: bool,
    /// Filter strength in percent, already clamped to 0-100
    pub intensity: u8,
    /// Grayscale in the administrative dashboard
    pub apply_to_admin: bool,
    /// Whether toggle buttons render
    pub allow_visitor_toggle: bool,
    /// Whether administrators get a toolbar toggle
    pub show_in_host_chrome: bool,
    /// Sanitized button label
    pub button_label: String,
    /// Values changed while resolving the settings file
    pub adjustments: Vec<String>,
    /// Where the settings were read from
    pub source: String,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        let Configuration {
            enabled,
            intensity,
            apply_to_admin,
            allow_visitor_toggle,
            show_in_host_chrome,
            button_label,
        } = settings.config;

        Self {
            enabled,
            intensity: intensity.percent(),
            apply_to_admin,
            allow_visitor_toggle,
            show_in_host_chrome,
            button_label,
            adjustments: settings.adjustments.iter().map(ToString::to_string).collect(),
            source: settings.source,
        }
    }
}

/// Current grayscale settings
///
/// Reads the settings file and returns the values pages are rendered with.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Resolved settings", body = SettingsResponse),
    ),
    tag = "Settings"
)]
pub async fn handle_settings(
    State(settings): State<Arc<dyn SettingsProvider>>,
) -> Json<SettingsResponse> {
    Json(settings.settings().into())
}
