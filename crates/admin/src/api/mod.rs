//! REST backend clients.
//!
//! One small client per backend resource, each bound to its own base URL.
//! Clients are cheap views over a single pooled [`reqwest::Client`] and are
//! built per request from the signed-in admin's [`Credentials`]; nothing
//! here holds a token between requests.
//!
//! # Example
//!
//! ```rust,ignore
//! let page = state
//!     .api()
//!     .products(&admin.credentials())
//!     .list(&ProductQuery::default())
//!     .await?;
//! ```

mod auth;
mod brands;
mod ebay;
mod error;
mod products;
mod quotes;
mod stats;
mod users;

pub use auth::AuthApi;
pub use brands::BrandsApi;
pub use ebay::EbayApi;
pub use error::{ApiError, FailureKind};
pub use products::ProductsApi;
pub use quotes::QuotesApi;
pub use stats::StatsApi;
pub use users::UsersApi;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::models::{BearerToken, Credentials};

/// Factory for per-resource clients.
#[derive(Clone)]
pub struct ApiClients {
    inner: Arc<ApiClientsInner>,
}

struct ApiClientsInner {
    http: reqwest::Client,
    backend: BackendConfig,
}

impl ApiClients {
    /// Build the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] if the TLS backend cannot be initialised.
    pub fn new(backend: BackendConfig, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bluewater-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            inner: Arc::new(ApiClientsInner { http, backend }),
        })
    }

    /// Backend URLs in use.
    #[must_use]
    pub fn backend(&self) -> &BackendConfig {
        &self.inner.backend
    }

    /// Login endpoint; the only unauthenticated client.
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.resource(&self.inner.backend.auth, None))
    }

    #[must_use]
    pub fn products(&self, credentials: &Credentials) -> ProductsApi {
        ProductsApi::new(self.resource(&self.inner.backend.products, Some(credentials)))
    }

    #[must_use]
    pub fn brands(&self, credentials: &Credentials) -> BrandsApi {
        BrandsApi::new(self.resource(&self.inner.backend.brands, Some(credentials)))
    }

    #[must_use]
    pub fn quotes(&self, credentials: &Credentials) -> QuotesApi {
        QuotesApi::new(self.resource(&self.inner.backend.quotes, Some(credentials)))
    }

    #[must_use]
    pub fn users(&self, credentials: &Credentials) -> UsersApi {
        UsersApi::new(self.resource(&self.inner.backend.users, Some(credentials)))
    }

    /// eBay endpoints also need the admin's email as a query parameter.
    #[must_use]
    pub fn ebay(&self, credentials: &Credentials) -> EbayApi {
        EbayApi::new(
            self.resource(&self.inner.backend.ebay, Some(credentials)),
            credentials.email.clone(),
        )
    }

    #[must_use]
    pub fn stats(&self, credentials: &Credentials) -> StatsApi {
        StatsApi::new(self.resource(&self.inner.backend.admin, Some(credentials)))
    }

    fn resource(&self, base_url: &str, credentials: Option<&Credentials>) -> Resource {
        Resource {
            http: self.inner.http.clone(),
            base_url: base_url.to_string(),
            token: credentials.map(|c| c.token.clone()),
        }
    }
}

/// A base URL plus the token to present there.
#[derive(Clone)]
pub(crate) struct Resource {
    http: reqwest::Client,
    base_url: String,
    token: Option<BearerToken>,
}

impl Resource {
    /// Start a request against `path`, relative to the resource base URL.
    ///
    /// An empty path targets the base URL itself.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    /// Send a request, treating any status `accept` does not allow as an error.
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        accept: Accept,
    ) -> Result<Response, ApiError> {
        let response = self.execute(builder).await?;
        let status = response.status();
        if accept.allows(status) {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_body(status, &body);
        tracing::error!(status = %status, error = %err, "Backend rejected request");
        Err(err)
    }

    /// Send a request and return whatever status came back.
    ///
    /// For endpoints whose status code is the answer (the eBay probe).
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::InvalidUrl)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!(%method, %path, error = %e, "Backend request failed");
            ApiError::Transport(e)
        })?;

        tracing::debug!(%method, %path, status = %response.status(), "Backend response");
        Ok(response)
    }

    /// Decode a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to read response: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode backend response");
            ApiError::Decode(e.to_string())
        })
    }
}

/// Which response statuses a call treats as success.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Accept {
    /// Exactly these statuses.
    Only(&'static [StatusCode]),
    /// Any 2xx.
    AnySuccess,
}

impl Accept {
    pub(crate) fn allows(self, status: StatusCode) -> bool {
        match self {
            Self::Only(statuses) => statuses.contains(&status),
            Self::AnySuccess => status.is_success(),
        }
    }
}

pub(crate) const OK: Accept = Accept::Only(&[StatusCode::OK]);
pub(crate) const OK_OR_CREATED: Accept = Accept::Only(&[StatusCode::OK, StatusCode::CREATED]);
pub(crate) const CREATED: Accept = Accept::Only(&[StatusCode::CREATED]);
