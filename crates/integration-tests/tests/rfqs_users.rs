//! Integration tests for RFQ review and user management.

use reqwest::StatusCode;

use bluewater_integration_tests::{TestApp, location};

// ============================================================================
// RFQs
// ============================================================================

#[tokio::test]
async fn test_rfq_listing_shows_backend_quotes() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app.get("/rfqs").await.text().await.unwrap();
    assert!(body.contains("Harbor Marine"));
    assert!(body.contains("Dockside Ltd"));
}

#[tokio::test]
async fn test_rfq_detail_loads_linked_product() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app.get("/rfqs/5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Two pumps please"));
    assert!(body.contains("Bilge Pump 1100"));
    assert_eq!(app.backend.requests_to("GET", "/products/1").len(), 1);
}

#[tokio::test]
async fn test_rfq_decision_is_local_only() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form("/rfqs/5/decision", &[("decision", "approve")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("The decision has not been saved."));
    assert!(body.contains("Approved"));

    let writes: Vec<_> = app
        .backend
        .requests()
        .into_iter()
        .filter(|r| r.path.starts_with("/quotes") && r.method != "GET")
        .collect();
    assert!(writes.is_empty(), "decision must not be sent: {writes:?}");

    // The backend still has it pending.
    let body = app.get("/rfqs/5").await.text().await.unwrap();
    assert!(body.contains("Pending"));
}

#[tokio::test]
async fn test_closed_rfq_cannot_be_decided() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app
        .post_form("/rfqs/6/decision", &[("decision", "reject")])
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("can no longer be reviewed"));
}

#[tokio::test]
async fn test_unknown_rfq_redirects_with_error() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app.get("/rfqs/404").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/rfqs?error="));
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_user_listing_excludes_current_admin() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app.get("/users").await.text().await.unwrap();
    assert!(body.contains(r#"data-user-id="8""#));
    assert!(!body.contains(r#"data-user-id="7""#));
    assert!(body.contains("Quartermaster"));
}

#[tokio::test]
async fn test_user_create_validates_before_backend() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app
        .post_form(
            "/users",
            &[("name", "Al"), ("email", "al@bluewater-supply.com"), ("password", "secret1")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Username should be at least 3 characters long"));
    assert!(app.backend.requests_to("POST", "/users").is_empty());
}

#[tokio::test]
async fn test_user_create_posts_to_backend() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form(
            "/users",
            &[
                ("name", "Bosun"),
                ("email", "bosun@bluewater-supply.com"),
                ("password", "secret1"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/users?success="));
    assert_eq!(app.backend.requests_to("POST", "/users").len(), 1);
}
