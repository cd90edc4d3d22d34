//! eBay connection state and product sync progress.

use serde::Deserialize;

use bluewater_core::serde_helpers::null_as_default;

/// Whether the backend holds a usable eBay token for this operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EbayConnection {
    Connected,
    Disconnected,
    /// The probe itself failed; state is unknown.
    Unknown,
}

impl EbayConnection {
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connected => "eBay connected",
            Self::Disconnected => "eBay not connected",
            Self::Unknown => "eBay status unknown",
        }
    }
}

/// One page of a product sync, as reported by `GET /products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPage {
    /// Running count of products synced so far.
    #[serde(default, deserialize_with = "null_as_default")]
    pub synced: u64,
    /// Authoritative page count for this sync.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

/// Progress line recorded after each sync page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    pub page: u32,
    pub total_pages: u32,
    pub synced: u64,
}

impl std::fmt::Display for SyncProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Synced page {} of {} ({} products so far)",
            self.page, self.total_pages, self.synced
        )
    }
}

/// Outcome of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Last synced count reported by the backend.
    pub synced: u64,
    /// Pages requested.
    pub pages: u32,
    /// One line per page, in order.
    pub log: Vec<String>,
}

impl SyncReport {
    /// Final status line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Sync complete: {} products synced", self.synced)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_page_from_camel_case() {
        let page: SyncPage = serde_json::from_str(r#"{"synced": 40, "totalPages": 3}"#).unwrap();
        assert_eq!(page, SyncPage { synced: 40, total_pages: 3 });
    }

    #[test]
    fn test_progress_line() {
        let line = SyncProgress {
            page: 2,
            total_pages: 3,
            synced: 80,
        }
        .to_string();
        assert_eq!(line, "Synced page 2 of 3 (80 products so far)");
    }
}
