//! Integration tests for the profile settings and brand management flows.

use reqwest::StatusCode;
use serde_json::json;

use bluewater_integration_tests::{ADMIN_EMAIL, ADMIN_TOKEN, BackendData, TestApp, location};

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_profile_update_refreshes_session_and_keeps_token() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form(
            "/settings/profile",
            &[("name", " Harbor Chief "), ("email", "chief@bluewater-supply.com")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/settings?success="), "{target}");

    let puts = app.backend.requests_to("PUT", "/users/7");
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].json(),
        json!({"name": "Harbor Chief", "email": "chief@bluewater-supply.com"})
    );

    let body = app.get(&target).await.text().await.unwrap();
    assert!(body.contains("Profile updated."));
    assert!(body.contains("Harbor Chief"));
    assert!(body.contains("chief@bluewater-supply.com"));

    // Later calls still use the token issued at login.
    app.get("/brands").await;
    let listed = app.backend.requests_to("GET", "/brands");
    assert_eq!(
        listed[0].authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_failed_profile_update_leaves_session_unchanged() {
    let app = TestApp::spawn_with(BackendData {
        user_update_status: StatusCode::CONFLICT,
        ..BackendData::default()
    })
    .await;
    app.login().await;

    let response = app
        .post_form(
            "/settings/profile",
            &[("name", "Harbor Chief"), ("email", "chief@bluewater-supply.com")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Could not update your profile")
    );

    let body = app.get("/settings").await.text().await.unwrap();
    assert!(body.contains("Dock Master"));
    assert!(body.contains(ADMIN_EMAIL));
    assert!(!body.contains("Harbor Chief"));
}

#[tokio::test]
async fn test_invalid_profile_never_reaches_backend() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app
        .post_form("/settings/profile", &[("name", "Al"), ("email", "chief@bluewater-supply.com")])
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Username should be at least 3 characters long"));
    assert!(app.backend.requests_to("PUT", "/users/7").is_empty());
}

// ============================================================================
// Brands
// ============================================================================

#[tokio::test]
async fn test_brand_create_sends_faq_in_order() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form(
            "/brands",
            &[
                ("name", "Lewmar"),
                ("description", "Anchoring and winches"),
                ("logo_url", ""),
                ("faq_text", "Warranty?\nShipping to EU?\nSpare parts?"),
                ("action", "save"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/brands?success="), "{target}");

    let posts = app.backend.requests_to("POST", "/brands");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].json()["faq"],
        json!(["Warranty?", "Shipping to EU?", "Spare parts?"])
    );

    let body = app.get(&target).await.text().await.unwrap();
    assert!(body.contains("Brand created."));
    assert!(body.contains("Lewmar"));
    assert_eq!(body.matches("data-brand-id=").count(), 2);
}

#[tokio::test]
async fn test_faq_edits_stay_in_form() {
    let app = TestApp::spawn().await;
    app.login().await;

    let body = app
        .post_form(
            "/brands",
            &[
                ("name", "Lewmar"),
                ("faq_text", "Warranty?"),
                ("faq_input", "Spare parts?"),
                ("action", "add_faq"),
            ],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Spare parts?"));
    assert!(app.backend.requests_to("POST", "/brands").is_empty());
}

#[tokio::test]
async fn test_brand_create_failure_keeps_listing() {
    let app = TestApp::spawn_with(BackendData {
        brand_write_status: StatusCode::CONFLICT,
        ..BackendData::default()
    })
    .await;
    app.login().await;

    let response = app
        .post_form("/brands", &[("name", "Rule"), ("action", "save")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Could not create the brand"));
    assert!(body.contains(r#"value="Rule""#));

    let body = app.get("/brands").await.text().await.unwrap();
    assert_eq!(body.matches("data-brand-id=").count(), 1);
}

#[tokio::test]
async fn test_brand_update_puts_to_backend() {
    let app = TestApp::spawn().await;
    app.login().await;

    let response = app
        .post_form(
            "/brands/10",
            &[
                ("name", "Rule Industries"),
                ("description", "Bilge pumps"),
                ("faq_text", "Warranty?"),
                ("action", "save"),
            ],
        )
        .await;
    assert!(location(&response).starts_with("/brands?success="));

    let puts = app.backend.requests_to("PUT", "/brands/10");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].json()["name"], "Rule Industries");

    let body = app.get("/brands").await.text().await.unwrap();
    assert!(body.contains("Rule Industries"));
}

#[tokio::test]
async fn test_brand_delete_success_and_failure() {
    let app = TestApp::spawn_with(BackendData {
        brand_write_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..BackendData::default()
    })
    .await;
    app.login().await;

    let response = app.post_form("/brands/10/delete", &[]).await;
    let target = location(&response);
    assert!(target.starts_with("/brands?error="), "{target}");
    let body = app.get(&target).await.text().await.unwrap();
    assert!(body.contains("Could not delete the brand"));
    assert!(body.contains(r#"data-brand-id="10""#));

    app.backend
        .update(|data| data.brand_write_status = StatusCode::OK);
    let response = app.post_form("/brands/10/delete", &[]).await;
    let target = location(&response);
    assert!(target.starts_with("/brands?success="), "{target}");
    let body = app.get(&target).await.text().await.unwrap();
    assert!(!body.contains(r#"data-brand-id="10""#));
}
