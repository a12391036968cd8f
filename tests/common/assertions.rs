//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use scraper::{Html, Selector};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is an HTML page
pub fn assert_html(response: &TestResponse) {
    assert_ok(response);
    let content_type = response.header("content-type").unwrap_or_default();
    assert!(
        content_type.starts_with("text/html"),
        "Expected Content-Type text/html, got {content_type:?}"
    );
}

/// Assert JSON error body has expected status field
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
}

/// Number of elements matching a CSS selector
pub fn count(doc: &Html, selector: &str) -> usize {
    let selector = Selector::parse(selector).expect("Invalid selector");
    doc.select(&selector).count()
}

/// Attribute of the first element matching a CSS selector
pub fn attr(doc: &Html, selector: &str, name: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("Invalid selector");
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr(name))
        .map(str::to_string)
}

/// Text content of the first element matching a CSS selector
pub fn text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("Invalid selector");
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Ids of all elements matching a CSS selector, in document order
pub fn ids(doc: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("Invalid selector");
    doc.select(&selector)
        .filter_map(|el| el.value().id().map(str::to_string))
        .collect()
}
