//! Brand endpoints.

use reqwest::Method;

use bluewater_core::BrandId;

use super::{Accept, ApiError, OK, Resource};
use crate::models::brand::BrandList;
use crate::models::{Brand, BrandInput};

/// Client for the brands backend. Mutations accept any 2xx.
#[derive(Clone)]
pub struct BrandsApi {
    resource: Resource,
}

impl BrandsApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{brands}`.
    pub async fn list(&self) -> Result<Vec<Brand>, ApiError> {
        let builder = self.resource.request(Method::GET, "");
        let response = self.resource.send(builder, OK).await?;
        let list: BrandList = Resource::json(response).await?;
        Ok(list.brands)
    }

    /// # Errors
    ///
    /// Returns an error for a non-2xx status.
    pub async fn create(&self, input: &BrandInput) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::POST, "").json(input);
        self.resource.send(builder, Accept::AnySuccess).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error for a non-2xx status.
    pub async fn update(&self, id: &BrandId, input: &BrandInput) -> Result<(), ApiError> {
        let builder = self
            .resource
            .request(Method::PUT, &format!("/{id}"))
            .json(input);
        self.resource.send(builder, Accept::AnySuccess).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error for a non-2xx status.
    pub async fn delete(&self, id: &BrandId) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::DELETE, &format!("/{id}"));
        self.resource.send(builder, Accept::AnySuccess).await?;
        Ok(())
    }
}
