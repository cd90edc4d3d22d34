//! Page-by-page eBay product sync.
//!
//! The backend syncs one page of the operator's eBay listings per call and
//! reports the authoritative page count in every response. The loop starts
//! with the count unknown, walks pages in order and stops once the page
//! number passes the last reported count. Any failed page aborts the sync.

use std::future::Future;

use thiserror::Error;
use tracing::instrument;

use crate::api::{ApiError, EbayApi};
use crate::models::{SyncPage, SyncProgress, SyncReport};

/// Anything that can sync a single page.
pub trait SyncPageSource {
    /// Sync `page`, passing the last known page count once there is one.
    fn sync_page(
        &self,
        page: u32,
        total_pages: Option<u32>,
    ) -> impl Future<Output = Result<SyncPage, ApiError>> + Send;
}

impl SyncPageSource for EbayApi {
    fn sync_page(
        &self,
        page: u32,
        total_pages: Option<u32>,
    ) -> impl Future<Output = Result<SyncPage, ApiError>> + Send {
        Self::sync_page(self, page, total_pages)
    }
}

/// A sync aborted part-way.
#[derive(Debug, Error)]
#[error("Sync failed on page {page}: {source}")]
pub struct SyncError {
    /// Page whose request failed.
    pub page: u32,
    /// Progress lines for the pages that did complete.
    pub log: Vec<String>,
    #[source]
    pub source: ApiError,
}

/// Run the sync to completion.
///
/// `on_progress` is called once per completed page, in order.
///
/// # Errors
///
/// Returns [`SyncError`] naming the first page that did not come back `200`.
#[instrument(skip_all)]
pub async fn run_sync<S, F>(source: &S, mut on_progress: F) -> Result<SyncReport, SyncError>
where
    S: SyncPageSource + Sync,
    F: FnMut(&SyncProgress) + Send,
{
    let mut page = 1;
    let mut total_pages = None;
    let mut synced = 0;
    let mut log = Vec::new();

    loop {
        let result = match source.sync_page(page, total_pages).await {
            Ok(result) => result,
            Err(source) => {
                tracing::error!(page, error = %source, "eBay sync aborted");
                return Err(SyncError { page, log, source });
            }
        };

        total_pages = Some(result.total_pages);
        synced = result.synced;

        let progress = SyncProgress {
            page,
            total_pages: result.total_pages,
            synced,
        };
        tracing::info!(page, total_pages = result.total_pages, synced, "eBay page synced");
        on_progress(&progress);
        log.push(progress.to_string());

        page += 1;
        if page > result.total_pages {
            break;
        }
    }

    Ok(SyncReport {
        synced,
        pages: page - 1,
        log,
    })
}
