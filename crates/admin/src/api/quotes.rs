//! Quote (RFQ) listing. The backend exposes no quote mutations.

use reqwest::Method;

use super::{ApiError, OK, Resource};
use crate::models::Quote;
use crate::models::quote::QuoteList;

#[derive(Clone)]
pub struct QuotesApi {
    resource: Resource,
}

impl QuotesApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// # Errors
    ///
    /// Returns an error unless the backend answers `200` with `{quotes}`.
    pub async fn list(&self) -> Result<Vec<Quote>, ApiError> {
        let builder = self.resource.request(Method::GET, "");
        let response = self.resource.send(builder, OK).await?;
        let list: QuoteList = Resource::json(response).await?;
        Ok(list.quotes)
    }
}
