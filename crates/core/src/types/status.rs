//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Review status of a request for quote.
///
/// Unrecognized statuses sent by the backend are read as `Pending`, so a new
/// backend status never breaks the RFQ listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Approved,
    Rejected,
    Review,
    #[default]
    #[serde(other)]
    Pending,
}

impl QuoteStatus {
    /// Human-readable badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Review => "Under Review",
        }
    }

    /// Badge glyph shown before the label.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Pending => "…",
            Self::Approved => "✓",
            Self::Rejected => "✗",
            Self::Review => "⊙",
        }
    }

    /// CSS classes for the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Pending => "bg-yellow-100 text-yellow-800",
            Self::Approved => "bg-blue-100 text-blue-800",
            Self::Rejected => "bg-red-100 text-red-800",
            Self::Review => "bg-green-100 text-green-800",
        }
    }

    /// Whether an operator can still approve or reject this quote.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Review => write!(f, "review"),
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "review" => Ok(Self::Review),
            _ => Err(format!("invalid quote status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_known_statuses() {
        let status: QuoteStatus = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(status, QuoteStatus::Review);
        let status: QuoteStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, QuoteStatus::Approved);
    }

    #[test]
    fn test_unknown_status_reads_as_pending() {
        let status: QuoteStatus = serde_json::from_str("\"escalated\"").unwrap();
        assert_eq!(status, QuoteStatus::Pending);
    }

    #[test]
    fn test_pending_is_default_and_parses_by_name() {
        let status: QuoteStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, QuoteStatus::Pending);
        assert_eq!(QuoteStatus::default(), QuoteStatus::Pending);
        assert_eq!(serde_json::to_string(&QuoteStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Approved,
            QuoteStatus::Rejected,
            QuoteStatus::Review,
        ] {
            assert_eq!(status.to_string().parse::<QuoteStatus>().unwrap(), status);
        }
        assert!("closed".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn test_only_pending_is_open() {
        assert!(QuoteStatus::Pending.is_open());
        assert!(!QuoteStatus::Review.is_open());
        assert!(!QuoteStatus::Approved.is_open());
    }
}
