//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Handler failure that cannot be shown as a page notice.
///
/// Backend failures are not here: handlers turn those into messages with
/// `failure_message` and keep rendering.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Admin request error"
        );

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Form validation failure. Raised before any backend call; the message is
/// shown above the re-rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields.")]
    MissingRequired,
    #[error("Price must be a non-negative number.")]
    InvalidPrice,
    #[error("Quantity must be a whole number.")]
    InvalidQuantity,
    #[error("Brand name required.")]
    BrandNameRequired,
    #[error("Username should be at least 3 characters long")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
}

/// Set the Sentry user context for the signed-in admin.
pub fn set_sentry_user(admin_id: &str, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_messages() {
        assert_eq!(
            FormError::MissingRequired.to_string(),
            "Please fill in all required fields."
        );
        assert_eq!(FormError::BrandNameRequired.to_string(), "Brand name required.");
        assert_eq!(
            FormError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_form_errors_compare_by_variant() {
        assert_eq!(FormError::InvalidPrice, FormError::InvalidPrice.clone());
        assert_ne!(FormError::InvalidPrice, FormError::InvalidQuantity);
    }
}
