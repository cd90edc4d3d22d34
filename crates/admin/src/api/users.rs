//! User account endpoints.

use reqwest::Method;

use bluewater_core::UserId;

use super::{ApiError, CREATED, OK, Resource};
use crate::models::user::UserList;
use crate::models::{NewUser, User, UserUpdate};

/// Client for the users backend.
#[derive(Clone)]
pub struct UsersApi {
    resource: Resource,
}

impl UsersApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Every account the backend knows, the caller's included.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{users}`.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let builder = self.resource.request(Method::GET, "");
        let response = self.resource.send(builder, OK).await?;
        let list: UserList = Resource::json(response).await?;
        Ok(list.users)
    }

    /// # Errors
    ///
    /// Returns an error unless the backend answers `201`.
    pub async fn create(&self, user: &NewUser) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::POST, "").json(user);
        self.resource.send(builder, CREATED).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error unless the backend answers `200`.
    pub async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<(), ApiError> {
        let builder = self
            .resource
            .request(Method::PUT, &format!("/{id}"))
            .json(update);
        self.resource.send(builder, OK).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error unless the backend answers `200`.
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::DELETE, &format!("/{id}"));
        self.resource.send(builder, OK).await?;
        Ok(())
    }
}
