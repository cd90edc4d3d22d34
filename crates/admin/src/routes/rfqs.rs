//! Request-for-quote pages.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use bluewater_core::QuoteId;

use super::{
    NoticeQuery, ShellView, failure_message, products::ProductView, redirect_with, render,
};
use crate::{
    filters,
    middleware::RequireAdminAuth,
    models::{CurrentAdmin, Quote},
    services::{Decision, decide},
    state::AppState,
};

const PATH: &str = "/rfqs";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rfqs", get(index))
        .route("/rfqs/{id}", get(show))
        .route("/rfqs/{id}/decision", post(decision))
}

/// Quote view for templates.
#[derive(Debug, Clone)]
pub struct QuoteView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub budget: String,
    pub message: String,
    pub date: String,
    pub status_label: String,
    pub status_glyph: String,
    pub status_class: String,
    pub is_open: bool,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        let or_dash = |value: &str| {
            if value.trim().is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            id: quote.id.to_string(),
            name: or_dash(&quote.name),
            email: quote.email.clone(),
            phone: or_dash(quote.phone.as_deref().unwrap_or_default()),
            budget: or_dash(&quote.budget),
            message: quote.message.clone(),
            date: or_dash(&quote.date),
            status_label: quote.status.label().to_string(),
            status_glyph: quote.status.glyph().to_string(),
            status_class: quote.status.badge_class().to_string(),
            is_open: quote.status.is_open(),
        }
    }
}

#[derive(Template)]
#[template(path = "rfqs/index.html")]
pub struct RfqsIndexTemplate {
    pub shell: ShellView,
    pub quotes: Vec<QuoteView>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "rfqs/show.html")]
pub struct RfqShowTemplate {
    pub shell: ShellView,
    pub quote: QuoteView,
    pub product: Option<ProductView>,
    /// Set when the linked product could not be loaded.
    pub product_error: Option<String>,
    /// Shown after a local decision.
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    pub decision: Decision,
}

#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let mut error = notice.error;
    let quotes = match state.api().quotes(&admin.credentials()).list().await {
        Ok(quotes) => quotes.iter().map(QuoteView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch quotes: {e}");
            error = Some(failure_message("load RFQs", &e));
            vec![]
        }
    };

    let template = RfqsIndexTemplate {
        shell: ShellView::load(&state, &admin, PATH).await,
        quotes,
        error,
    };
    render(&template)
}

/// Quote detail with its linked product, if any.
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = QuoteId::new(id);
    match find_quote(&state, &admin, &id).await {
        Ok(quote) => detail_page(&state, &admin, &quote, None, None)
            .await
            .into_response(),
        Err(response) => response,
    }
}

/// Approve or reject an open quote for this view only.
#[instrument(skip(admin, state, form), fields(decision = ?form.decision))]
pub async fn decision(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DecisionForm>,
) -> Response {
    let id = QuoteId::new(id);
    let quote = match find_quote(&state, &admin, &id).await {
        Ok(quote) => quote,
        Err(response) => return response,
    };

    match decide(quote.clone(), form.decision) {
        Ok(decided) => {
            tracing::info!(
                quote_id = %id,
                previous = %decided.previous,
                status = %decided.quote.status,
                "RFQ decided locally"
            );
            let notice = decided.notice();
            detail_page(&state, &admin, &decided.quote, Some(notice), None)
                .await
                .into_response()
        }
        Err(e) => {
            tracing::warn!(quote_id = %id, "Rejected RFQ decision: {e}");
            detail_page(&state, &admin, &quote, None, Some(e.to_string()))
                .await
                .into_response()
        }
    }
}

/// Look a quote up in the listing; the backend has no single-quote endpoint.
async fn find_quote(
    state: &AppState,
    admin: &CurrentAdmin,
    id: &QuoteId,
) -> Result<Quote, Response> {
    let quotes = state
        .api()
        .quotes(&admin.credentials())
        .list()
        .await
        .map_err(|e| {
            tracing::error!(quote_id = %id, "Failed to fetch quotes: {e}");
            redirect_with(PATH, "error", &failure_message("load the RFQ", &e))
        })?;

    quotes
        .into_iter()
        .find(|q| &q.id == id)
        .ok_or_else(|| redirect_with(PATH, "error", "RFQ not found."))
}

async fn detail_page(
    state: &AppState,
    admin: &CurrentAdmin,
    quote: &Quote,
    notice: Option<String>,
    error: Option<String>,
) -> Html<String> {
    let (product, product_error) = match quote.product_id() {
        Some(pid) => match state.api().products(&admin.credentials()).get(pid).await {
            Ok(product) => (Some(ProductView::from(&product)), None),
            Err(e) => {
                tracing::error!(product_id = %pid, "Failed to fetch quoted product: {e}");
                (None, Some(failure_message("load the quoted product", &e)))
            }
        },
        None => (None, None),
    };

    let template = RfqShowTemplate {
        shell: ShellView::load(state, admin, PATH).await,
        quote: QuoteView::from(quote),
        product,
        product_error,
        notice,
        error,
    };
    render(&template)
}
