//! Header parsing utilities for page requests.

use axum::http::HeaderMap;

use crate::models::{Viewer, VIEWER_ROLE_HEADER};

/// Extension trait for convenient header parsing.
pub trait HeaderMapExt {
    /// Get a header value as a string, returning None if missing.
    fn get_str(&self, name: &str) -> Option<&str>;

    /// The viewer described by the `X-Viewer-Role` header.
    fn viewer(&self) -> Viewer;
}

impl HeaderMapExt for HeaderMap {
    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    fn viewer(&self) -> Viewer {
        Viewer::from_role(self.get_str(VIEWER_ROLE_HEADER))
    }
}
