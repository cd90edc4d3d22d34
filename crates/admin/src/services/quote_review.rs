//! Operator decisions on open quotes.
//!
//! The quotes backend has no endpoint for recording a decision, so approving
//! or rejecting only changes the quote as rendered for this response. Nothing
//! in this module talks to the backend; callers must tell the operator the
//! decision was not saved.

use serde::Deserialize;
use thiserror::Error;

use bluewater_core::{QuoteId, QuoteStatus};

use crate::models::Quote;

/// What the operator chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    #[must_use]
    pub const fn resulting_status(self) -> QuoteStatus {
        match self {
            Self::Approve => QuoteStatus::Approved,
            Self::Reject => QuoteStatus::Rejected,
        }
    }
}

/// A decision applied to a local copy of a quote only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDecision {
    /// The quote with its status replaced.
    pub quote: Quote,
    /// Status before the decision.
    pub previous: QuoteStatus,
    pub decision: Decision,
}

impl LocalDecision {
    /// Notice shown next to the re-rendered quote.
    #[must_use]
    pub fn notice(&self) -> String {
        format!(
            "RFQ {} marked {} for this view only. The decision has not been saved.",
            self.quote.id,
            self.quote.status.label().to_lowercase()
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("RFQ {id} is {status} and can no longer be reviewed")]
    NotOpen { id: QuoteId, status: QuoteStatus },
}

/// Apply `decision` to a pending quote.
///
/// # Errors
///
/// Returns [`ReviewError::NotOpen`] if the quote is not pending.
pub fn decide(mut quote: Quote, decision: Decision) -> Result<LocalDecision, ReviewError> {
    let previous = quote.status;
    if !previous.is_open() {
        return Err(ReviewError::NotOpen {
            id: quote.id,
            status: previous,
        });
    }
    quote.status = decision.resulting_status();
    Ok(LocalDecision {
        quote,
        previous,
        decision,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn quote(status: QuoteStatus) -> Quote {
        Quote {
            id: QuoteId::from(9),
            name: "Dockside Ltd".to_string(),
            email: "buy@dockside.com".to_string(),
            phone: None,
            budget: "2500".to_string(),
            message: "Need two bilge pumps".to_string(),
            date: "2025-03-02".to_string(),
            status,
            pid: None,
        }
    }

    #[test]
    fn test_approve_pending() {
        let decided = decide(quote(QuoteStatus::Pending), Decision::Approve).unwrap();
        assert_eq!(decided.quote.status, QuoteStatus::Approved);
        assert_eq!(decided.previous, QuoteStatus::Pending);
        assert!(decided.notice().contains("has not been saved"));
    }

    #[test]
    fn test_reject_pending() {
        let decided = decide(quote(QuoteStatus::Pending), Decision::Reject).unwrap();
        assert_eq!(decided.quote.status, QuoteStatus::Rejected);
        assert_eq!(
            decided.notice(),
            "RFQ 9 marked rejected for this view only. The decision has not been saved."
        );
    }

    #[test]
    fn test_closed_quote_cannot_be_decided() {
        let err = decide(quote(QuoteStatus::Approved), Decision::Reject).unwrap_err();
        assert_eq!(
            err,
            ReviewError::NotOpen {
                id: QuoteId::from(9),
                status: QuoteStatus::Approved
            }
        );
        assert_eq!(err.to_string(), "RFQ 9 is approved and can no longer be reviewed");
    }

    #[test]
    fn test_decision_from_form_value() {
        let d: Decision = serde_json::from_str(r#""approve""#).unwrap();
        assert_eq!(d, Decision::Approve);
    }
}
