//! Authentication extractors for admin.
//!
//! The session user is the only authentication state: present means signed
//! in. Tokens are never checked for expiry here; a rejected token surfaces
//! as a backend error on the next call.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::models::{CurrentAdmin, session_keys};

/// Path unauthenticated requests are sent to.
pub const LOGIN_PATH: &str = "/signup";

/// Extractor that requires admin authentication.
///
/// If the admin is not logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// No session user.
    RedirectToLogin,
    /// The session layer is not installed on this router.
    SessionLayerMissing,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::SessionLayerMissing => {
                tracing::error!("Session extension missing from request");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::SessionLayerMissing)?;

        let admin = current_admin(session)
            .await
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        set_sentry_user(admin.id.as_str(), &admin.email);
        Ok(Self(admin))
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdminAuth`, this does not reject the request if the admin is not logged in.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => current_admin(session).await,
            None => None,
        };

        Ok(Self(admin))
    }
}

/// The persisted session user, if any. Unreadable session data counts as
/// signed out.
pub async fn current_admin(session: &Session) -> Option<CurrentAdmin> {
    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Request, header::LOCATION};
    use tower_sessions::MemoryStore;

    use super::*;

    async fn require(
        path: &str,
        session: Option<Session>,
    ) -> Result<CurrentAdmin, AdminAuthRejection> {
        let mut request = Request::get(path).body(()).unwrap();
        if let Some(session) = session {
            request.extensions_mut().insert(session);
        }
        let (mut parts, ()) = request.into_parts();
        RequireAdminAuth::from_request_parts(&mut parts, &())
            .await
            .map(|RequireAdminAuth(admin)| admin)
    }

    fn empty_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_signed_out_requests_redirect_on_every_path() {
        for path in ["/dashboard", "/api/products", "/ebay/oauth"] {
            let rejection = require(path, Some(empty_session())).await.unwrap_err();
            assert_eq!(rejection, AdminAuthRejection::RedirectToLogin, "{path}");

            let response = rejection.into_response();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], LOGIN_PATH);
        }
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_server_error() {
        let rejection = require("/dashboard", None).await.unwrap_err();
        assert_eq!(rejection, AdminAuthRejection::SessionLayerMissing);
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
