//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check (registered in `app`)
//!
//! # Auth
//! GET  /signup                     - Login page
//! POST /signup                     - Submit credentials
//! POST /auth/logout                - Logout
//!
//! # Dashboard
//! GET  /                           - Redirect to /dashboard
//! GET  /dashboard                  - Totals and recent RFQs
//!
//! # Products
//! GET  /products                   - Filtered, paginated listing
//! GET  /products/new               - Create form
//! POST /products                   - Create
//! GET  /products/{id}/edit         - Edit form
//! POST /products/{id}              - Update
//! POST /products/{id}/delete       - Delete
//!
//! # Brands (same shape as products, plus in-form FAQ editing)
//! GET  /brands, /brands/new, /brands/{id}/edit
//! POST /brands, /brands/{id}, /brands/{id}/delete
//!
//! # RFQs
//! GET  /rfqs                       - Listing
//! GET  /rfqs/{id}                  - Detail with linked product
//! POST /rfqs/{id}/decision         - Local-only approve/reject
//!
//! # Users & Roles
//! GET  /users, /users/new, /users/{id}/edit
//! POST /users, /users/{id}, /users/{id}/delete
//!
//! # Settings
//! GET  /settings                   - Profile form
//! POST /settings/profile           - Save profile
//!
//! # eBay
//! GET  /ebay/oauth                 - OAuth callback / connection status
//! POST /ebay/sync                  - Run product sync
//! GET  /ebay/connect               - Redirect to eBay's authorization page
//! ```

pub mod auth;
pub mod brands;
pub mod dashboard;
pub mod ebay;
pub mod products;
pub mod rfqs;
pub mod settings;
pub mod users;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    api::{ApiError, FailureKind},
    filters,
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, EbayConnection},
    services::probe_connection,
    state::AppState,
};

/// Build the admin router (everything except `/health`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(brands::router())
        .merge(rfqs::router())
        .merge(users::router())
        .merge(settings::router())
        .merge(ebay::router())
        .fallback(not_found)
}

// =============================================================================
// Shared views
// =============================================================================

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    /// Short handle shown in the header.
    pub username: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            username: admin.username(),
        }
    }
}

/// Everything the layout (sidebar and header) needs.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub ebay: EbayConnection,
}

impl ShellView {
    /// Build the layout view, probing the eBay connection for the header.
    pub async fn load(state: &AppState, admin: &CurrentAdmin, current_path: &str) -> Self {
        let ebay = probe_connection(&state.api().ebay(&admin.credentials())).await;
        Self::new(admin, current_path, ebay)
    }

    #[must_use]
    pub fn new(admin: &CurrentAdmin, current_path: &str, ebay: EbayConnection) -> Self {
        Self {
            admin_user: AdminUserView::from(admin),
            current_path: current_path.to_string(),
            ebay,
        }
    }

    /// Whether `path` is the active sidebar section.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path || self.current_path.starts_with(&format!("{path}/"))
    }
}

/// `?success=` / `?error=` flash parameters carried through redirects.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Build a redirect to `path` carrying a flash message.
#[must_use]
pub fn redirect_with(path: &str, key: &str, message: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!("{path}{separator}{query}")).into_response()
}

/// User-facing text for a failed backend call.
///
/// `action` completes the sentence "Could not ...", e.g. "delete the product".
#[must_use]
pub fn failure_message(action: &str, err: &ApiError) -> String {
    match (err.kind(), err) {
        (FailureKind::Unavailable, _) => {
            format!("Could not {action}: the backend is unavailable. Please try again.")
        }
        (FailureKind::Unauthorized, _) => format!(
            "Could not {action}: the backend rejected your session. Sign out and sign in again."
        ),
        (FailureKind::NotFound, _) => format!("Could not {action}: it no longer exists."),
        (FailureKind::Rejected, ApiError::Status { message, .. }) => {
            format!("Could not {action}: {message}")
        }
        _ => format!("Could not {action}: the backend sent an unexpected response."),
    }
}

/// Render a template, logging and masking render failures.
pub fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

// =============================================================================
// Not found
// =============================================================================

/// 404 page template, rendered inside the shell.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub shell: ShellView,
}

/// Fallback for unknown paths. Signed-out visitors go to the login page.
async fn not_found(RequireAdminAuth(admin): RequireAdminAuth) -> Response {
    // No eBay probe for a page that does not exist.
    let template = NotFoundTemplate {
        shell: ShellView::new(&admin, "", EbayConnection::Unknown),
    };
    (StatusCode::NOT_FOUND, render(&template)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_by_kind() {
        let err = ApiError::from_body(StatusCode::BAD_REQUEST, r#"{"message":"Title taken"}"#);
        assert_eq!(
            failure_message("create the product", &err),
            "Could not create the product: Title taken"
        );

        let err = ApiError::from_body(StatusCode::NOT_FOUND, "");
        assert_eq!(
            failure_message("delete the brand", &err),
            "Could not delete the brand: it no longer exists."
        );

        let err = ApiError::from_body(StatusCode::UNAUTHORIZED, "");
        assert!(failure_message("load users", &err).contains("rejected your session"));

        let err = ApiError::Decode("expected `items`".to_string());
        assert!(failure_message("load products", &err).ends_with("unexpected response."));
    }

    #[test]
    fn test_redirect_with_encodes_message() {
        let response = redirect_with("/products", "error", "Could not delete: a & b");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/products?error=Could+not+delete%3A+a+%26+b"
        );
    }

    #[test]
    fn test_shell_active_section() {
        let admin = CurrentAdmin {
            id: bluewater_core::AdminId::from(1),
            name: "Ops".to_string(),
            email: "ops7@harbor.com".to_string(),
            token: crate::models::BearerToken::new("t"),
        };
        let shell = ShellView::new(&admin, "/products/12/edit", EbayConnection::Connected);
        assert!(shell.is_active("/products"));
        assert!(!shell.is_active("/product"));
        assert!(!shell.is_active("/brands"));
        assert_eq!(shell.admin_user.username, "ops");
    }
}
