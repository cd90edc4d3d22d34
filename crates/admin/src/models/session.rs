//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use bluewater_core::AdminId;

/// Bearer token issued by the backend at login.
///
/// `Debug` is redacted so the token never lands in logs or trace fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Session-stored admin identity.
///
/// The single user record the panel keeps: created on login, replaced on
/// profile update, removed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Backend id of the admin account.
    pub id: AdminId,
    /// Display name.
    pub name: String,
    /// Email used to sign in.
    pub email: String,
    /// Token attached to every backend call.
    pub token: BearerToken,
}

impl CurrentAdmin {
    /// Credentials to hand to a resource client.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            token: self.token.clone(),
        }
    }

    /// Short handle shown in the header: the email's local part without
    /// digits, or "User" when nothing is left.
    #[must_use]
    pub fn username(&self) -> String {
        let local = self.email.split('@').next().unwrap_or_default();
        let stripped: String = local.chars().filter(|c| !c.is_ascii_digit()).collect();
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            "User".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// What a resource client needs to act on behalf of the signed-in admin.
///
/// Passed explicitly into each client; there is no process-wide token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Admin email, required by the eBay endpoints.
    pub email: String,
    /// Bearer token for the `Authorization` header.
    pub token: BearerToken,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(email: &str) -> CurrentAdmin {
        CurrentAdmin {
            id: AdminId::from(1),
            name: "Dock Master".to_string(),
            email: email.to_string(),
            token: BearerToken::new("tok-123"),
        }
    }

    #[test]
    fn test_username_strips_digits() {
        assert_eq!(admin("skipper42@harbor.com").username(), "skipper");
    }

    #[test]
    fn test_username_falls_back_to_user() {
        assert_eq!(admin("12345@harbor.com").username(), "User");
        assert_eq!(admin("").username(), "User");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let debug = format!("{:?}", admin("a@b.co"));
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credentials_carry_email_and_token() {
        let creds = admin("ops@harbor.com").credentials();
        assert_eq!(creds.email, "ops@harbor.com");
        assert_eq!(creds.token.expose(), "tok-123");
    }
}
