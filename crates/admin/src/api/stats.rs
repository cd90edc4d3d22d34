//! Admin dashboard statistics.

use reqwest::Method;

use super::{ApiError, OK, Resource};
use crate::models::DashboardStats;

#[derive(Clone)]
pub struct StatsApi {
    resource: Resource,
}

impl StatsApi {
    pub(crate) const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// `GET {admin}/dashboard/stats`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the backend answers `200`.
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        let builder = self.resource.request(Method::GET, "/dashboard/stats");
        let response = self.resource.send(builder, OK).await?;
        Resource::json(response).await
    }
}
