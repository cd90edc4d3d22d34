//! Integration tests for sign-in, the session gate and logout.

use reqwest::StatusCode;

use bluewater_integration_tests::{ADMIN_EMAIL, ADMIN_TOKEN, TestApp, location};

// ============================================================================
// Session Gate
// ============================================================================

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let app = TestApp::spawn().await;

    for path in ["/dashboard", "/products", "/brands", "/rfqs", "/users", "/ebay/oauth"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/signup", "{path}");
    }

    assert!(
        app.backend.requests().is_empty(),
        "signed-out requests must not reach the backend"
    );
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::spawn().await;
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success_opens_dashboard() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Dock Master"));
    assert!(body.contains(ADMIN_EMAIL));

    let stats = app.backend.requests_to("GET", "/admin/dashboard/stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(
        stats[0].authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app.get("/signup").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_wrong_password_shows_invalid_credentials() {
    let app = TestApp::spawn().await;

    let response = app.login_as(ADMIN_EMAIL, "wrong").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Invalid credentials"));

    let response = app.get("/dashboard").await;
    assert_eq!(location(&response), "/signup");
}

#[tokio::test]
async fn test_blank_fields_never_reach_backend() {
    let app = TestApp::spawn().await;

    let response = app.login_as("   ", "").await;
    assert!(response.text().await.unwrap().contains("Please fill in all fields"));
    assert!(app.backend.requests_to("POST", "/auth/login").is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_reports_unavailable() {
    let app = TestApp::spawn_unreachable().await;

    let response = app.login_as(ADMIN_EMAIL, "harbor-lights").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("The sign-in service is unavailable")
    );
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app.post_form("/auth/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup");

    let response = app.get("/dashboard").await;
    assert_eq!(location(&response), "/signup");
}
