//! Requests for quote submitted by customers.

use serde::{Deserialize, Serialize};

use bluewater_core::{
    ProductId, QuoteId, QuoteStatus,
    serde_helpers::{lenient_string, null_as_default},
};

/// A customer's request for quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-form budget; the backend sends numbers and ranges alike.
    #[serde(default, deserialize_with = "lenient_string")]
    pub budget: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: QuoteStatus,
    /// Product the quote was raised against, if any.
    #[serde(default)]
    pub pid: Option<ProductId>,
}

impl Quote {
    /// Linked product id, ignoring blank values.
    #[must_use]
    pub fn product_id(&self) -> Option<&ProductId> {
        self.pid.as_ref().filter(|id| !id.as_str().trim().is_empty())
    }
}

/// Envelope of the quote listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuoteList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub quotes: Vec<Quote>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_with_numeric_budget_and_pid() {
        let quote: Quote = serde_json::from_str(
            r#"{"id": 12, "name": "Harbor Marine", "email": "buy@harbor.com",
                "budget": 15000, "status": "review", "pid": 44}"#,
        )
        .unwrap();
        assert_eq!(quote.budget, "15000");
        assert_eq!(quote.status, QuoteStatus::Review);
        assert_eq!(quote.pid, Some(ProductId::from(44)));
        assert_eq!(quote.phone, None);
    }

    #[test]
    fn test_unknown_or_null_status_is_pending() {
        let quote: Quote =
            serde_json::from_str(r#"{"id": "q1", "status": "escalated"}"#).unwrap();
        assert_eq!(quote.status, QuoteStatus::Pending);
        let quote: Quote = serde_json::from_str(r#"{"id": "q1", "status": null}"#).unwrap();
        assert_eq!(quote.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_blank_pid_is_no_product() {
        let quote: Quote = serde_json::from_str(r#"{"id": "q1", "pid": ""}"#).unwrap();
        assert_eq!(quote.product_id(), None);
    }
}
