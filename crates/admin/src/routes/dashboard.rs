//! Dashboard route handler.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use tracing::instrument;

use super::{NoticeQuery, ShellView, failure_message, render, rfqs::QuoteView};
use crate::{
    filters,
    middleware::RequireAdminAuth,
    models::DashboardStats,
    state::AppState,
};

/// Quotes shown in the "Recent RFQs" card.
const RECENT_QUOTES: usize = 5;

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(index))
}

/// Dashboard metrics.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub products: String,
    pub brands: String,
    pub quotes: String,
    pub pending_quotes: String,
    pub users: String,
}

impl From<&DashboardStats> for DashboardMetrics {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            products: stats.products.to_string(),
            brands: stats.brands.to_string(),
            quotes: stats.quotes.to_string(),
            pending_quotes: stats.pending_quotes.to_string(),
            users: stats.users.to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shell: ShellView,
    pub metrics: DashboardMetrics,
    pub recent_quotes: Vec<QuoteView>,
    pub success: Option<String>,
    pub errors: Vec<String>,
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let credentials = admin.credentials();
    let mut errors: Vec<String> = notice.error.into_iter().collect();

    let stats = match state.api().stats(&credentials).dashboard().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to fetch dashboard stats: {e}");
            errors.push(failure_message("load dashboard totals", &e));
            DashboardStats::default()
        }
    };

    let recent_quotes = match state.api().quotes(&credentials).list().await {
        Ok(quotes) => quotes
            .iter()
            .take(RECENT_QUOTES)
            .map(QuoteView::from)
            .collect(),
        Err(e) => {
            tracing::error!("Failed to fetch recent quotes: {e}");
            errors.push(failure_message("load recent RFQs", &e));
            vec![]
        }
    };

    let template = DashboardTemplate {
        shell: ShellView::load(&state, &admin, "/dashboard").await,
        metrics: DashboardMetrics::from(&stats),
        recent_quotes,
        success: notice.success,
        errors,
    };

    render(&template)
}
