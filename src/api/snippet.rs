use axum::{
    extract::{Query, State},
    response::Html,
};
use grayscale_core::RenderContext;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::services::{PageService, SettingsProvider};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SnippetQuery {
    /// `public` (default) or `admin`
    pub context: Option<String>,
}

/// Head markup for embedding in another host
///
/// Returns the grayscale style block and toggle behavior for the given
/// context, or an empty body when grayscale is off there.
#[utoipa::path(
    get,
    path = "/api/snippet",
    params(SnippetQuery),
    responses(
        (status = 200, description = "Head markup", body = String, content_type = "text/html"),
        (status = 400, description = "Unknown context"),
    ),
    tag = "Settings"
)]
pub async fn handle_snippet(
    State(settings): State<Arc<dyn SettingsProvider>>,
    State(pages): State<Arc<PageService>>,
    Query(query): Query<SnippetQuery>,
) -> Result<Html<String>, ApiError> {
    let context = match query.context.as_deref() {
        None => RenderContext::Public,
        Some(name) => RenderContext::parse(name)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown context '{name}'")))?,
    };

    let settings = settings.settings();
    Ok(Html(pages.head_snippet(&settings.config, context)?))
}
