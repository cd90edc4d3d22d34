//! Brand pages.
//!
//! The brand form edits its FAQ list in place: "Add" and "Remove" buttons
//! post back to the same form, which re-renders with the edited list and
//! issues no backend call. Only "Save" reaches the backend.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use bluewater_core::BrandId;

use super::{NoticeQuery, ShellView, failure_message, redirect_with, render};
use crate::{
    error::FormError,
    filters,
    middleware::RequireAdminAuth,
    models::{Brand, BrandInput, CurrentAdmin, FaqList},
    state::AppState,
};

const PATH: &str = "/brands";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brands", get(index).post(create))
        .route("/brands/new", get(new_page))
        .route("/brands/{id}/edit", get(edit_page))
        .route("/brands/{id}", post(update))
        .route("/brands/{id}/delete", post(delete))
}

/// Brand card for the listing.
#[derive(Debug, Clone)]
pub struct BrandView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub faq_count: usize,
}

impl From<&Brand> for BrandView {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id.to_string(),
            name: brand.name.clone(),
            description: brand.description.clone(),
            logo_url: (!brand.logo_url.trim().is_empty()).then(|| brand.logo_url.clone()),
            faq_count: brand.faq.len(),
        }
    }
}

#[derive(Template)]
#[template(path = "brands/index.html")]
pub struct BrandsIndexTemplate {
    pub shell: ShellView,
    pub brands: Vec<BrandView>,
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "brands/form.html")]
pub struct BrandFormTemplate {
    pub shell: ShellView,
    pub brand_id: Option<String>,
    pub form: BrandForm,
    pub faq: Vec<String>,
    pub error: Option<String>,
}

/// Which button submitted the brand form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandAction {
    Save,
    AddFaq,
    RemoveFaq(usize),
}

impl BrandAction {
    /// Parse the submit button value: `save`, `add_faq` or `remove_faq:<index>`.
    /// Anything else saves.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some(("remove_faq", index)) => index.parse().map_or(Self::Save, Self::RemoveFaq),
            _ if raw == "add_faq" => Self::AddFaq,
            _ => Self::Save,
        }
    }
}

/// Brand form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: String,
    /// Current FAQ entries, one per line.
    #[serde(default)]
    pub faq_text: String,
    /// New FAQ entry being typed.
    #[serde(default)]
    pub faq_input: String,
    #[serde(default)]
    pub action: String,
}

impl BrandForm {
    #[must_use]
    pub fn from_brand(brand: &Brand) -> Self {
        Self {
            name: brand.name.clone(),
            description: brand.description.clone(),
            logo_url: brand.logo_url.clone(),
            faq_text: FaqList::from(brand.faq.clone()).to_lines(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn faq(&self) -> FaqList {
        FaqList::from_lines(&self.faq_text)
    }

    /// Apply an in-form FAQ edit. Returns an error message when the edit
    /// was rejected.
    pub fn apply(&mut self, action: BrandAction) -> Option<String> {
        let mut faq = self.faq();
        let error = match action {
            BrandAction::AddFaq => {
                if faq.add(&self.faq_input) {
                    self.faq_input.clear();
                    None
                } else {
                    Some("FAQ entry cannot be empty.".to_string())
                }
            }
            BrandAction::RemoveFaq(index) => {
                faq.remove(index);
                None
            }
            BrandAction::Save => None,
        };
        self.faq_text = faq.to_lines();
        error
    }

    /// Check the submission and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::BrandNameRequired`] for a blank name.
    pub fn validate(&self) -> Result<BrandInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::BrandNameRequired);
        }
        Ok(BrandInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            logo_url: self.logo_url.trim().to_string(),
            faq: self.faq().into_vec(),
        })
    }
}

#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let mut error = notice.error;
    let brands = match state.api().brands(&admin.credentials()).list().await {
        Ok(brands) => brands.iter().map(BrandView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch brands: {e}");
            error = Some(failure_message("load brands", &e));
            vec![]
        }
    };

    let template = BrandsIndexTemplate {
        shell: ShellView::load(&state, &admin, PATH).await,
        brands,
        success: notice.success,
        error,
    };
    render(&template)
}

#[instrument(skip(admin, state))]
pub async fn new_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    form_page(&state, &admin, None, BrandForm::default(), None).await
}

/// Edit form. The backend has no single-brand endpoint, so the brand is
/// looked up in the listing.
#[instrument(skip(admin, state))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = BrandId::new(id);
    let brands = match state.api().brands(&admin.credentials()).list().await {
        Ok(brands) => brands,
        Err(e) => {
            tracing::error!(brand_id = %id, "Failed to fetch brands: {e}");
            return redirect_with(PATH, "error", &failure_message("load the brand", &e));
        }
    };

    match brands.iter().find(|b| b.id == id) {
        Some(brand) => form_page(&state, &admin, Some(&id), BrandForm::from_brand(brand), None)
            .await
            .into_response(),
        None => redirect_with(PATH, "error", "Brand not found."),
    }
}

#[instrument(skip(admin, state, form), fields(action = %form.action))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<BrandForm>,
) -> Response {
    submit(&state, &admin, None, form).await
}

#[instrument(skip(admin, state, form), fields(action = %form.action))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BrandForm>,
) -> Response {
    submit(&state, &admin, Some(BrandId::new(id)), form).await
}

#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = BrandId::new(id);
    match state.api().brands(&admin.credentials()).delete(&id).await {
        Ok(()) => {
            tracing::info!(brand_id = %id, "Brand deleted");
            redirect_with(PATH, "success", "Brand deleted.")
        }
        Err(e) => {
            tracing::error!(brand_id = %id, "Failed to delete brand: {e}");
            redirect_with(PATH, "error", &failure_message("delete the brand", &e))
        }
    }
}

async fn submit(
    state: &AppState,
    admin: &CurrentAdmin,
    id: Option<BrandId>,
    mut form: BrandForm,
) -> Response {
    let action = BrandAction::parse(&form.action);
    if action != BrandAction::Save {
        let error = form.apply(action);
        return form_page(state, admin, id.as_ref(), form, error)
            .await
            .into_response();
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return form_page(state, admin, id.as_ref(), form, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    let api = state.api().brands(&admin.credentials());
    let (result, verb) = match &id {
        Some(id) => (api.update(id, &input).await, "update"),
        None => (api.create(&input).await, "create"),
    };

    match result {
        Ok(()) => {
            tracing::info!(brand = %input.name, "Brand {verb}d");
            let message = if id.is_some() {
                "Brand updated."
            } else {
                "Brand created."
            };
            redirect_with(PATH, "success", message)
        }
        Err(e) => {
            tracing::error!("Failed to {verb} brand: {e}");
            let message = failure_message(&format!("{verb} the brand"), &e);
            form_page(state, admin, id.as_ref(), form, Some(message))
                .await
                .into_response()
        }
    }
}

async fn form_page(
    state: &AppState,
    admin: &CurrentAdmin,
    brand_id: Option<&BrandId>,
    form: BrandForm,
    error: Option<String>,
) -> Html<String> {
    let template = BrandFormTemplate {
        shell: ShellView::load(state, admin, PATH).await,
        brand_id: brand_id.map(ToString::to_string),
        faq: form.faq().into_vec(),
        form,
        error,
    };
    render(&template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(BrandAction::parse("save"), BrandAction::Save);
        assert_eq!(BrandAction::parse("add_faq"), BrandAction::AddFaq);
        assert_eq!(BrandAction::parse("remove_faq:2"), BrandAction::RemoveFaq(2));
        assert_eq!(BrandAction::parse("remove_faq:x"), BrandAction::Save);
        assert_eq!(BrandAction::parse(""), BrandAction::Save);
    }

    #[test]
    fn test_add_then_remove_faq() {
        let mut form = BrandForm {
            name: "Garmin".to_string(),
            faq_text: "Warranty?".to_string(),
            faq_input: "  Do you ship to Canada?  ".to_string(),
            ..BrandForm::default()
        };
        assert_eq!(form.apply(BrandAction::AddFaq), None);
        assert!(form.faq_input.is_empty());
        assert_eq!(form.faq().entries(), ["Warranty?", "Do you ship to Canada?"]);

        form.apply(BrandAction::RemoveFaq(0));
        assert_eq!(form.faq().entries(), ["Do you ship to Canada?"]);
    }

    #[test]
    fn test_blank_faq_entry_is_rejected() {
        let mut form = BrandForm {
            faq_text: "Warranty?".to_string(),
            faq_input: "   ".to_string(),
            ..BrandForm::default()
        };
        assert!(form.apply(BrandAction::AddFaq).is_some());
        assert_eq!(form.faq().entries().len(), 1);
    }

    #[test]
    fn test_name_required() {
        let form = BrandForm {
            name: "  ".to_string(),
            ..BrandForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::BrandNameRequired));

        let form = BrandForm {
            name: " Yamaha ".to_string(),
            faq_text: "Parts?\nService?".to_string(),
            ..BrandForm::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Yamaha");
        assert_eq!(input.faq.len(), 2);
    }
}
