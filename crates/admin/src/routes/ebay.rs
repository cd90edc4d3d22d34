//! eBay connection and product sync.
//!
//! eBay may hand the authorization code back in the URL fragment, which the
//! browser never sends. When the callback arrives without a code the page
//! checks `location.hash` and, if it carries one, reloads itself once with
//! the full URL in `?url=` so the code can be read here.

use askama::Template;
use axum::{
    Router,
    extract::{OriginalUri, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use super::{NoticeQuery, ShellView, failure_message, redirect_with, render};
use crate::{
    filters,
    middleware::RequireAdminAuth,
    models::EbayConnection,
    services::{complete_oauth, extract_oauth_code, run_sync},
    state::AppState,
};

const PATH: &str = "/ebay";
const OAUTH_PATH: &str = "/ebay/oauth";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ebay/oauth", get(oauth))
        .route("/ebay/sync", post(sync))
        .route("/ebay/connect", get(connect))
}

#[derive(Template)]
#[template(path = "ebay/oauth.html")]
pub struct EbayTemplate {
    pub shell: ShellView,
    /// Outcome of the OAuth exchange or probe.
    pub status_message: Option<String>,
    /// Emit the fragment-forwarding script.
    pub forward_fragment: bool,
    /// One line per synced page.
    pub sync_log: Vec<String>,
    pub sync_summary: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl EbayTemplate {
    fn new(shell: ShellView) -> Self {
        Self {
            shell,
            status_message: None,
            forward_fragment: false,
            sync_log: vec![],
            sync_summary: None,
            success: None,
            error: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OAuthQuery {
    /// Full callback URL forwarded by the page when the code was in the fragment.
    pub url: Option<String>,
}

/// OAuth callback and connection status page.
#[instrument(skip(admin, state, uri))]
pub async fn oauth(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<OAuthQuery>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let request_url = uri.to_string();
    let code = extract_oauth_code(query.url.as_deref().unwrap_or(&request_url));
    let ebay = state.api().ebay(&admin.credentials());

    let mut error = notice.error;
    let (status_message, connection) = match complete_oauth(&ebay, code.as_deref()).await {
        Ok(outcome) => {
            let connection = if outcome.is_connected() {
                EbayConnection::Connected
            } else {
                EbayConnection::Disconnected
            };
            (Some(outcome.message()), connection)
        }
        Err(e) => {
            tracing::error!("eBay OAuth request failed: {e}");
            error = Some(failure_message("reach the eBay service", &e));
            (None, EbayConnection::Unknown)
        }
    };

    let template = EbayTemplate {
        status_message,
        forward_fragment: query.url.is_none() && code.is_none(),
        success: notice.success,
        error,
        // The OAuth response already answers the header's question.
        ..EbayTemplate::new(ShellView::new(&admin, PATH, connection))
    };
    render(&template)
}

/// Run the product sync to completion and show its log.
#[instrument(skip(admin, state))]
pub async fn sync(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let ebay = state.api().ebay(&admin.credentials());
    let mut template = EbayTemplate::new(ShellView::load(&state, &admin, PATH).await);

    match run_sync(&ebay, |_| {}).await {
        Ok(report) => {
            tracing::info!(synced = report.synced, pages = report.pages, "eBay sync complete");
            template.sync_summary = Some(report.summary());
            template.sync_log = report.log;
        }
        Err(e) => {
            template.error = Some(format!(
                "Sync failed on page {}. {}",
                e.page,
                failure_message("sync eBay products", &e.source)
            ));
            template.sync_log = e.log;
        }
    }

    render(&template)
}

/// "Connect eBay" / "Re-connect" button target: always a full redirect to
/// eBay's authorization page, whatever the current connection state.
#[instrument(skip_all)]
pub async fn connect(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Response {
    match &state.config().ebay_oauth_url {
        Some(url) => Redirect::to(url.expose_secret()).into_response(),
        None => {
            tracing::warn!("EBAY_OAUTH_URL is not set");
            redirect_with(OAUTH_PATH, "error", "eBay OAuth URL is not configured.")
        }
    }
}
