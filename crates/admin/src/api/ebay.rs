//! eBay connection and product sync endpoints.
//!
//! Every call identifies the operator by email in the query string in
//! addition to the bearer token.

use reqwest::{Method, StatusCode};

use super::{ApiError, OK, Resource};
use crate::models::SyncPage;

/// Client for the eBay integration backend.
#[derive(Clone)]
pub struct EbayApi {
    resource: Resource,
    email: String,
}

impl EbayApi {
    pub(crate) const fn new(resource: Resource, email: String) -> Self {
        Self { resource, email }
    }

    /// `GET /oauth`, finalizing a connection when `code` is set and probing
    /// the existing one otherwise.
    ///
    /// The status code is the answer, so any response is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    pub async fn oauth(&self, code: Option<&str>) -> Result<StatusCode, ApiError> {
        let mut builder = self
            .resource
            .request(Method::GET, "/oauth")
            .query(&[("email", self.email.as_str())]);
        if let Some(code) = code {
            builder = builder.query(&[("success", "True"), ("code", code)]);
        }
        let response = self.resource.execute(builder).await?;
        Ok(response.status())
    }

    /// Sync one page of products. `total_pages` is omitted until the backend
    /// has reported it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{synced, totalPages}`.
    pub async fn sync_page(
        &self,
        page: u32,
        total_pages: Option<u32>,
    ) -> Result<SyncPage, ApiError> {
        let mut builder = self.resource.request(Method::GET, "/products").query(&[
            ("email", self.email.clone()),
            ("page", page.to_string()),
        ]);
        if let Some(total_pages) = total_pages {
            builder = builder.query(&[("totalPages", total_pages.to_string())]);
        }
        let response = self.resource.send(builder, OK).await?;
        Resource::json(response).await
    }
}
