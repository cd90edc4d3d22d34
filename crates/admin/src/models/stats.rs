//! Dashboard totals.

use serde::Deserialize;

use bluewater_core::serde_helpers::null_as_default;

/// Totals shown on the dashboard. Missing counters read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brands: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_quotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: u64,
}
