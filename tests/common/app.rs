//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use scraper::Html;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use grayscale_mode::assets::AssetLoader;
use grayscale_mode::server::{build_router, create_app_state, AppState};

/// Test application with router and, for file-backed apps, the settings file
pub struct TestApp {
    router: axum::Router,
    settings_dir: Option<TempDir>,
}

impl TestApp {
    /// Create a new test application using embedded assets
    pub fn new() -> Self {
        Self {
            router: build_router(Self::create_state()),
            settings_dir: None,
        }
    }

    /// Create a test application reading settings from a temporary file
    pub fn with_settings(yaml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, yaml).expect("Failed to write settings");

        let asset_loader = Arc::new(AssetLoader::new(None, Some(path)));
        let state = create_app_state(asset_loader).expect("Failed to create app state");

        Self {
            router: build_router(state),
            settings_dir: Some(dir),
        }
    }

    /// Create a test app state for custom router configuration
    pub fn create_state() -> AppState {
        let asset_loader = Arc::new(AssetLoader::new(None, None));
        create_app_state(asset_loader).expect("Failed to create app state")
    }

    /// Replace the settings file of a file-backed app
    pub fn write_settings(&self, yaml: &str) {
        let dir = self
            .settings_dir
            .as_ref()
            .expect("App was not created with_settings");
        std::fs::write(dir.path().join("config.yaml"), yaml).expect("Failed to write settings");
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a GET request as an administrator
    pub async fn get_as_admin(&self, path: &str) -> TestResponse {
        self.get_with_headers(path, &[("X-Viewer-Role", "administrator")])
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse body as an HTML document
    pub fn html(&self) -> Html {
        Html::parse_document(&self.text())
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
