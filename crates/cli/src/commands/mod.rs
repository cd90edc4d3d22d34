//! Command implementations.

pub mod auth;
pub mod ebay;

use std::time::Duration;

use clap::Args;
use thiserror::Error;

use bluewater_admin::{
    api::{ApiClients, ApiError},
    config::{BackendConfig, ConfigError},
    models::{BearerToken, Credentials},
    services::SyncError,
};

const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Identity for commands that act as a signed-in admin.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Admin email address
    #[arg(short, long, env = "BW_EMAIL")]
    pub email: String,

    /// Bearer token from `bw-cli login`
    #[arg(long, env = "BW_TOKEN", hide_env_values = true)]
    pub token: String,
}

impl SessionArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            token: BearerToken::new(self.token.clone()),
        }
    }
}

/// Build the backend clients from `--backend`, or from the per-resource
/// environment variables when it is not given.
pub fn clients(backend: Option<&str>) -> Result<ApiClients, CliError> {
    let backend = match backend {
        Some(origin) => BackendConfig::single_origin(origin),
        None => BackendConfig::from_env()?,
    };
    Ok(ApiClients::new(backend, TIMEOUT)?)
}
