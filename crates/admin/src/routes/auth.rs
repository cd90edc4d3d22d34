//! Login and logout.
//!
//! Login posts the operator's credentials to the auth backend and, on a 200,
//! stores the returned admin record (with its bearer token) in the session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::render;
use crate::{
    api::ApiError,
    error::{AppError, clear_sentry_user},
    filters,
    middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Login form input.
#[derive(Debug, Default, Deserialize)]
pub struct LoginFormInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Why a login attempt did not produce a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    MissingFields,
    InvalidCredentials,
    Unavailable,
    SessionUnavailable,
}

impl LoginFailure {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Please fill in all fields",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Unavailable => "The sign-in service is unavailable. Please try again.",
            Self::SessionUnavailable => "Could not start your session. Please try again.",
        }
    }

    /// Classify a failed login call. Only a missing response is "unavailable";
    /// every status other than 200 reads as bad credentials.
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(_) | ApiError::Build(_) | ApiError::InvalidUrl(_) => {
                Self::Unavailable
            }
            ApiError::Status { .. } | ApiError::Decode(_) => Self::InvalidCredentials,
        }
    }
}

/// Login page. Already signed-in admins go straight to the dashboard.
#[instrument(skip(admin))]
pub async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    render(&LoginTemplate {
        email: String::new(),
        error: None,
    })
    .into_response()
}

/// Submit credentials.
#[instrument(skip(state, session, input), fields(email = %input.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<LoginFormInput>,
) -> Response {
    let email = input.email.trim().to_string();
    let failed = |failure: LoginFailure, email: String| {
        render(&LoginTemplate {
            email,
            error: Some(failure.message().to_string()),
        })
        .into_response()
    };

    if email.is_empty() || input.password.trim().is_empty() {
        return failed(LoginFailure::MissingFields, email);
    }

    let admin = match state.api().auth().login(&email, &input.password).await {
        Ok(admin) => admin,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            return failed(LoginFailure::from_api(&e), email);
        }
    };

    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!(error = %e, "Failed to store session");
        return failed(LoginFailure::SessionUnavailable, email);
    }

    tracing::info!(admin_id = %admin.id, "Admin signed in");
    Redirect::to("/dashboard").into_response()
}

/// Logout: drop the session user and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/signup"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_any_status_is_invalid_credentials() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::CREATED,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = ApiError::from_body(status, "");
            assert_eq!(LoginFailure::from_api(&err), LoginFailure::InvalidCredentials);
        }
    }

    #[test]
    fn test_unreadable_success_is_invalid_credentials() {
        let err = ApiError::Decode("missing field `token`".to_string());
        assert_eq!(
            LoginFailure::from_api(&err).message(),
            "Invalid credentials"
        );
    }
}
