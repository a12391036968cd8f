use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Html,
};
use std::sync::Arc;

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::services::{PageService, SettingsProvider};

/// Front page of the site
///
/// Renders the first configured page with the grayscale layer, the floating
/// toggle button, any `[grayscale_toggle]` buttons in the content, and the
/// toolbar toggle for administrators.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Rendered front page", body = String, content_type = "text/html"),
        (status = 404, description = "No pages configured"),
    ),
    params(
        ("X-Viewer-Role" = Option<String>, Header, description = "Viewer role, e.g. 'administrator'"),
    ),
    tag = "Pages"
)]
pub async fn handle_home(
    State(settings): State<Arc<dyn SettingsProvider>>,
    State(pages): State<Arc<PageService>>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let settings = settings.settings();
    Ok(Html(pages.render_public(&settings, None, &headers.viewer())?))
}

/// A page of the site by slug
#[utoipa::path(
    get,
    path = "/pages/{slug}",
    responses(
        (status = 200, description = "Rendered page", body = String, content_type = "text/html"),
        (status = 404, description = "Unknown page"),
    ),
    params(
        ("slug" = String, Path, description = "Page slug from the settings file"),
        ("X-Viewer-Role" = Option<String>, Header, description = "Viewer role, e.g. 'administrator'"),
    ),
    tag = "Pages"
)]
pub async fn handle_page(
    State(settings): State<Arc<dyn SettingsProvider>>,
    State(pages): State<Arc<PageService>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let settings = settings.settings();
    Ok(Html(pages.render_public(
        &settings,
        Some(&slug),
        &headers.viewer(),
    )?))
}

/// Administrative dashboard
///
/// Shows the resolved settings. Grayscale applies here only when
/// `apply_admin` is set.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Rendered dashboard", body = String, content_type = "text/html"),
    ),
    params(
        ("X-Viewer-Role" = Option<String>, Header, description = "Viewer role, e.g. 'administrator'"),
    ),
    tag = "Pages"
)]
pub async fn handle_admin(
    State(settings): State<Arc<dyn SettingsProvider>>,
    State(pages): State<Arc<PageService>>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let settings = settings.settings();
    Ok(Html(pages.render_admin(&settings, &headers.viewer())?))
}
