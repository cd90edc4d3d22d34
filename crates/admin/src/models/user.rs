//! Back-office user accounts.

use serde::{Deserialize, Serialize};

use bluewater_core::{
    UserId,
    serde_helpers::{lenient_string, null_as_default},
};

/// A user account as listed by the users backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

/// Body of `POST /`. The password is only ever sent on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
}

/// Envelope of the user listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// Drop the signed-in operator from a user listing.
#[must_use]
pub fn without_current(users: Vec<User>, current_email: &str) -> Vec<User> {
    users
        .into_iter()
        .filter(|user| user.email != current_email)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_is_excluded_by_email() {
        let list: UserList = serde_json::from_str(
            r#"{"users": [
                {"id": 1, "name": "Ops", "email": "ops@harbor.com"},
                {"id": 2, "name": "Me", "email": "me@harbor.com"},
                {"id": 3, "name": "Also Me", "email": "me@harbor.com"}
            ]}"#,
        )
        .unwrap();
        let users = without_current(list.users, "me@harbor.com");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, UserId::from(1));
    }

    #[test]
    fn test_update_body_has_no_password() {
        let body = serde_json::to_value(UserUpdate {
            name: "Ops".to_string(),
            email: "ops@harbor.com".to_string(),
        })
        .unwrap();
        assert!(body.get("password").is_none());
    }
}
