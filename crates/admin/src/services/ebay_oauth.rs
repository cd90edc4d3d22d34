//! eBay OAuth completion and connection probing.

use reqwest::StatusCode;
use url::Url;

use crate::api::{ApiError, EbayApi};
use crate::models::EbayConnection;

/// Pull the OAuth `code` out of a callback URL.
///
/// The query string wins; otherwise the fragment is read as
/// `key=value&...`, with or without a leading `?`. Relative URLs are
/// accepted. Blank codes count as absent.
#[must_use]
pub fn extract_oauth_code(raw: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = Url::options().base_url(Some(&base)).parse(raw).ok()?;

    let from_query = url
        .query_pairs()
        .find(|(key, value)| key == "code" && !value.trim().is_empty())
        .map(|(_, value)| value.into_owned());
    if from_query.is_some() {
        return from_query;
    }

    let fragment = url.fragment()?;
    let fragment = fragment.strip_prefix('?').unwrap_or(fragment);
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, value)| key == "code" && !value.trim().is_empty())
        .map(|(_, value)| value.into_owned())
}

/// What the OAuth page reports after talking to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthOutcome {
    /// A code was exchanged successfully.
    Connected,
    /// A code was present but the backend refused it.
    Failed(StatusCode),
    /// No code, but the backend already holds a token.
    AlreadyConnected,
    /// No code and no existing connection.
    MissingCode,
}

impl OAuthOutcome {
    /// Interpret the response to a code exchange: 200 or 201 means connected.
    #[must_use]
    pub fn from_exchange(status: StatusCode) -> Self {
        if status == StatusCode::OK || status == StatusCode::CREATED {
            Self::Connected
        } else {
            Self::Failed(status)
        }
    }

    /// Interpret the response to a code-less probe: only 201 means connected.
    #[must_use]
    pub fn from_probe(status: StatusCode) -> Self {
        if status == StatusCode::CREATED {
            Self::AlreadyConnected
        } else {
            Self::MissingCode
        }
    }

    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::AlreadyConnected)
    }

    /// Status line for the OAuth page.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Connected => "eBay account connected successfully.".to_string(),
            Self::Failed(status) => {
                format!("Failed to connect eBay account (backend returned {status}).")
            }
            Self::AlreadyConnected => "eBay account is already connected.".to_string(),
            Self::MissingCode => "Authorization code is missing or invalid.".to_string(),
        }
    }
}

/// Finalize the connection when a code is present, probe otherwise.
///
/// # Errors
///
/// Returns an error only when the backend could not be reached.
pub async fn complete_oauth(
    ebay: &EbayApi,
    code: Option<&str>,
) -> Result<OAuthOutcome, ApiError> {
    let status = ebay.oauth(code).await?;
    tracing::info!(has_code = code.is_some(), %status, "eBay OAuth response");
    Ok(match code {
        Some(_) => OAuthOutcome::from_exchange(status),
        None => OAuthOutcome::from_probe(status),
    })
}

/// Connection state for the header badge. Never fails: an unreachable
/// backend reads as [`EbayConnection::Unknown`].
pub async fn probe_connection(ebay: &EbayApi) -> EbayConnection {
    match ebay.oauth(None).await {
        Ok(StatusCode::CREATED) => EbayConnection::Connected,
        Ok(_) => EbayConnection::Disconnected,
        Err(e) => {
            tracing::warn!(error = %e, "eBay connection probe failed");
            EbayConnection::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_query() {
        assert_eq!(
            extract_oauth_code("https://admin.example.com/ebay/oauth?code=ABC&state=xyz"),
            Some("ABC".to_string())
        );
    }

    #[test]
    fn test_code_from_fragment() {
        assert_eq!(
            extract_oauth_code("https://admin.example.com/ebay/oauth#code=ABC&state=xyz"),
            Some("ABC".to_string())
        );
        assert_eq!(
            extract_oauth_code("/ebay/oauth#?code=ABC"),
            Some("ABC".to_string())
        );
    }

    #[test]
    fn test_query_wins_over_fragment() {
        assert_eq!(
            extract_oauth_code("/ebay/oauth?code=Q#code=F"),
            Some("Q".to_string())
        );
    }

    #[test]
    fn test_code_is_percent_decoded() {
        assert_eq!(
            extract_oauth_code("/ebay/oauth?code=v%5E1.1%23i"),
            Some("v^1.1#i".to_string())
        );
    }

    #[test]
    fn test_no_code() {
        assert_eq!(extract_oauth_code("/ebay/oauth"), None);
        assert_eq!(extract_oauth_code("/ebay/oauth?state=xyz#foo=bar"), None);
        assert_eq!(extract_oauth_code("/ebay/oauth?code="), None);
    }

    #[test]
    fn test_exchange_statuses() {
        assert_eq!(OAuthOutcome::from_exchange(StatusCode::OK), OAuthOutcome::Connected);
        assert_eq!(OAuthOutcome::from_exchange(StatusCode::CREATED), OAuthOutcome::Connected);
        assert_eq!(
            OAuthOutcome::from_exchange(StatusCode::BAD_REQUEST),
            OAuthOutcome::Failed(StatusCode::BAD_REQUEST)
        );
    }

    #[test]
    fn test_probe_statuses() {
        assert_eq!(
            OAuthOutcome::from_probe(StatusCode::CREATED),
            OAuthOutcome::AlreadyConnected
        );
        // A plain 200 on the probe is not a connection.
        assert_eq!(OAuthOutcome::from_probe(StatusCode::OK), OAuthOutcome::MissingCode);
        assert!(!OAuthOutcome::MissingCode.is_connected());
    }
}
