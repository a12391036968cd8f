//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::services::{FileSettingsProvider, MarkupRenderer, PageService, SettingsProvider};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<dyn SettingsProvider>,
    pub pages: Arc<PageService>,
}

impl FromRef<AppState> for Arc<dyn SettingsProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<PageService> {
    fn from_ref(state: &AppState) -> Self {
        state.pages.clone()
    }
}

/// Create application state from an asset loader.
///
/// Settings are re-read from the loader on every request.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let settings = Arc::new(FileSettingsProvider::new(asset_loader.clone()));
    create_app_state_with_settings(&asset_loader, settings)
}

/// Create application state with a custom settings provider.
pub fn create_app_state_with_settings(
    asset_loader: &AssetLoader,
    settings: Arc<dyn SettingsProvider>,
) -> anyhow::Result<AppState> {
    let markup = MarkupRenderer::new(asset_loader)
        .map_err(|e| anyhow::anyhow!("Failed to load templates: {e}"))?;

    Ok(AppState {
        settings,
        pages: Arc::new(PageService::new(markup)),
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Pages depend
/// on the settings file and the viewer, so responses are marked
/// `Cache-Control: no-cache`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Site
        .route("/", get(api::handle_home))
        .route("/pages/:slug", get(api::handle_page))
        .route("/admin", get(api::handle_admin))
        // Settings API
        .route("/api/settings", get(api::handle_settings))
        .route("/api/snippet", get(api::handle_snippet))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
}
