//! Product catalogue endpoints.

use reqwest::Method;

use bluewater_core::ProductId;

use super::{ApiError, OK, OK_OR_CREATED, Resource};
use crate::models::product::ProductEnvelope;
use crate::models::{Product, ProductInput, ProductPage, ProductQuery};

/// Client for the products backend.
#[derive(Clone)]
pub struct ProductsApi {
    resource: Resource,
}

impl ProductsApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    #[cfg(test)]
    pub(crate) const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Fetch one page of products with the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{items, pagination}`.
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let builder = self.resource.request(Method::GET, "").query(query);
        let response = self.resource.send(builder, OK).await?;
        Resource::json(response).await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{product}`.
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        let builder = self.resource.request(Method::GET, &format!("/{id}"));
        let response = self.resource.send(builder, OK).await?;
        let envelope: ProductEnvelope = Resource::json(response).await?;
        Ok(envelope.product)
    }

    /// Create a product. The backend answers `200` or `201`.
    ///
    /// # Errors
    ///
    /// Returns an error for any other status.
    pub async fn create(&self, input: &ProductInput) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::POST, "/add").json(input);
        self.resource.send(builder, OK_OR_CREATED).await?;
        Ok(())
    }

    /// Replace a product's fields. The id travels in the path only.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200`.
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<(), ApiError> {
        let builder = self
            .resource
            .request(Method::PUT, &format!("/{id}"))
            .json(input);
        self.resource.send(builder, OK).await?;
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200`.
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        let builder = self.resource.request(Method::DELETE, &format!("/{id}"));
        self.resource.send(builder, OK).await?;
        Ok(())
    }
}
