//! Integration tests for the site pages (/, /pages/:slug, /admin).

mod common;

use axum::http::StatusCode;
use common::fixtures::{self, selectors};
use common::{assert_html, assert_json_error, attr, count, ids, text, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_front_page_with_embedded_settings() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert_html(&response);

    let doc = response.html();
    assert_eq!(count(&doc, selectors::HEAD), 1);
    assert_eq!(count(&doc, selectors::FLOATING), 1);
    assert_eq!(count(&doc, selectors::INLINE), 1);
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
    assert_eq!(attr(&doc, selectors::BODY, "class").as_deref(), Some("sgm-grayscale"));
    assert!(!response.text().contains("[grayscale_toggle]"));
}

#[tokio::test]
async fn test_filter_rules_in_head_script() {
    let app = TestApp::new();
    let doc = app.get("/").await.html();

    let css = text(&doc, selectors::HEAD).unwrap();
    assert!(css.contains("html.sgm-grayscale-root"));
    assert!(css.contains("grayscale(100%)"));
    assert!(css.contains(".no-grayscale"));
    assert!(css.contains("@media print"));
    assert!(css.contains("html.sgm-user-off"));
}

#[tokio::test]
async fn test_opt_out_content_is_kept() {
    let app = TestApp::new();
    let doc = app.get("/").await.html();
    assert_eq!(count(&doc, "figure.no-grayscale"), 1);
}

#[tokio::test]
async fn test_floating_button_initial_state() {
    let app = TestApp::new();
    let doc = app.get("/").await.html();

    assert_eq!(
        attr(&doc, selectors::FLOATING, "aria-pressed").as_deref(),
        Some("false")
    );
    assert_eq!(
        attr(&doc, selectors::FLOATING, "title").as_deref(),
        Some("Grayscale is ON")
    );
    assert_eq!(
        attr(&doc, selectors::FLOATING, "aria-label").as_deref(),
        Some("Toggle grayscale")
    );
    assert_eq!(
        text(&doc, selectors::FLOATING).as_deref(),
        Some("Toggle grayscale")
    );
}

#[tokio::test]
async fn test_toolbar_item_only_for_administrators() {
    let app = TestApp::new();

    let doc = app.get_as_admin("/").await.html();
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 1);
    assert_eq!(
        text(&doc, selectors::TOOLBAR_ITEM).as_deref(),
        Some("Grayscale: Toggle")
    );

    let doc = app
        .get_with_headers("/", &[("X-Viewer-Role", "editor")])
        .await
        .html();
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
}

#[tokio::test]
async fn test_named_page() {
    let app = TestApp::new();

    let response = app.get("/pages/about").await;
    assert_html(&response);

    let doc = response.html();
    assert_eq!(text(&doc, "main h1").as_deref(), Some("About"));
    assert_eq!(count(&doc, selectors::HEAD), 1);
    assert_eq!(count(&doc, selectors::FLOATING), 1);
    assert_eq!(count(&doc, selectors::INLINE), 0);
}

#[tokio::test]
async fn test_unknown_page_is_json_404() {
    let app = TestApp::new();
    let response = app.get("/pages/does-not-exist").await;
    assert_json_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shortcodes_expand_once_each_with_unique_ids() {
    let app = TestApp::with_settings(fixtures::ALL_ON);

    let response = app.get("/").await;
    assert_html(&response);

    let doc = response.html();
    assert_eq!(
        ids(&doc, selectors::INLINE),
        vec!["sgmToggleInline".to_string(), "sgmToggleInline-2".to_string()]
    );
    // Escaped shortcode stays as text
    assert!(response.text().contains("<p>[grayscale_toggle]</p>"));
}

#[tokio::test]
async fn test_disabled_renders_no_layer() {
    let app = TestApp::with_settings(fixtures::DISABLED);

    let response = app.get_as_admin("/").await;
    assert_html(&response);

    let doc = response.html();
    assert_eq!(count(&doc, selectors::HEAD), 0);
    assert_eq!(count(&doc, selectors::FLOATING), 0);
    assert_eq!(count(&doc, selectors::INLINE), 0);
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
    assert_eq!(attr(&doc, selectors::BODY, "class").as_deref(), Some(""));
    assert!(!response.text().contains("sgmUserOff"));
    assert!(!response.text().contains("[grayscale_toggle]"));
}

#[tokio::test]
async fn test_toggle_disallowed_keeps_filter() {
    let app = TestApp::with_settings(fixtures::NO_TOGGLE);

    let doc = app.get_as_admin("/").await.html();
    assert_eq!(count(&doc, selectors::HEAD), 1);
    assert_eq!(count(&doc, selectors::FLOATING), 0);
    assert_eq!(count(&doc, selectors::INLINE), 0);
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
}

#[tokio::test]
async fn test_sanitized_label_and_clamped_intensity() {
    let app = TestApp::with_settings(fixtures::MESSY);

    let doc = app.get("/").await.html();
    assert_eq!(text(&doc, selectors::FLOATING).as_deref(), Some("Colour please"));
    assert!(text(&doc, selectors::HEAD)
        .unwrap()
        .contains("grayscale(100%)"));
}

#[tokio::test]
async fn test_label_is_escaped() {
    let app = TestApp::with_settings("grayscale:\n  button_label: \"Dark & light\"\n");

    let response = app.get("/").await;
    assert!(response.text().contains("Dark &amp; light"));
    assert_eq!(
        text(&response.html(), selectors::FLOATING).as_deref(),
        Some("Dark & light")
    );
}

#[tokio::test]
async fn test_settings_edits_apply_on_next_request() {
    let app = TestApp::with_settings(fixtures::ALL_ON);
    assert_eq!(count(&app.get("/").await.html(), selectors::HEAD), 1);

    app.write_settings(fixtures::DISABLED);
    assert_eq!(count(&app.get("/").await.html(), selectors::HEAD), 0);
}

#[tokio::test]
async fn test_admin_dashboard_defaults_to_color() {
    let app = TestApp::new();

    let response = app.get_as_admin("/admin").await;
    assert_html(&response);

    let doc = response.html();
    assert_eq!(count(&doc, selectors::HEAD), 0);
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
    assert_eq!(text(&doc, "#opt-enabled").as_deref(), Some("On"));
    assert_eq!(text(&doc, "#opt-intensity").as_deref(), Some("100"));
    assert_eq!(text(&doc, "#opt-apply-admin").as_deref(), Some("Off"));
}

#[tokio::test]
async fn test_admin_dashboard_with_apply_admin() {
    let app = TestApp::with_settings(fixtures::ALL_ON);

    let doc = app.get_as_admin("/admin").await.html();
    assert_eq!(count(&doc, selectors::HEAD), 1);
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 1);
    // Buttons belong to the public site only
    assert_eq!(count(&doc, selectors::FLOATING), 0);

    let doc = app.get("/admin").await.html();
    assert_eq!(count(&doc, selectors::TOOLBAR_ITEM), 0);
}

/// Public and admin pages use the same storage key, so opting out on one
/// also turns the filter off on the other.
#[tokio::test]
async fn test_public_and_admin_share_preference_key() {
    let app = TestApp::with_settings(fixtures::ALL_ON);

    let public = app.get("/").await.text();
    let admin = app.get_as_admin("/admin").await.text();

    let key = r#"var KEY = "sgmUserOff";"#;
    assert!(public.contains(key));
    assert!(admin.contains(key));
}

#[tokio::test]
async fn test_pages_are_not_cached() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.header("cache-control"), Some("no-cache"));
}
