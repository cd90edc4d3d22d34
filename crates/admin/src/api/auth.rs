//! Login against the auth backend.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use bluewater_core::AdminId;

use super::{ApiError, OK, Resource};
use crate::models::{BearerToken, CurrentAdmin};

/// Client for `POST {auth}/login`.
#[derive(Clone)]
pub struct AuthApi {
    resource: Resource,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    admin: LoginAdmin,
    token: String,
}

#[derive(Deserialize)]
struct LoginAdmin {
    id: AdminId,
    #[serde(default)]
    name: String,
}

impl AuthApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    #[cfg(test)]
    pub(crate) const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Exchange credentials for a session user.
    ///
    /// Only `200 OK` counts as success. The returned admin carries the email
    /// as submitted, since the backend does not echo it.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for any other status, [`ApiError::Transport`] when
    /// the backend is unreachable.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentAdmin, ApiError> {
        let builder = self
            .resource
            .request(Method::POST, "/login")
            .json(&LoginRequest { email, password });
        let response = self.resource.send(builder, OK).await?;
        let body: LoginResponse = Resource::json(response).await?;

        Ok(CurrentAdmin {
            id: body.admin.id,
            name: body.admin.name,
            email: email.to_string(),
            token: BearerToken::new(body.token),
        })
    }
}
