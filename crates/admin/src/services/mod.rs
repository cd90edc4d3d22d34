//! Workflows that span more than one backend call.
//!
//! # Services
//!
//! - `ebay_oauth` - OAuth code extraction, connection finalize and probe
//! - `ebay_sync` - page-cursor product sync loop
//! - `quote_review` - local-only approve/reject of open quotes

pub mod ebay_oauth;
pub mod ebay_sync;
pub mod quote_review;

pub use ebay_oauth::{OAuthOutcome, complete_oauth, extract_oauth_code, probe_connection};
pub use ebay_sync::{SyncError, SyncPageSource, run_sync};
pub use quote_review::{Decision, LocalDecision, ReviewError, decide};
