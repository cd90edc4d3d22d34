//! Product catalogue pages.

use std::str::FromStr;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use bluewater_core::{PageRequest, Pagination, ProductId};

use super::{NoticeQuery, ShellView, failure_message, redirect_with, render};
use crate::{
    components::{FilterBar, FilterOption, product_filter_bar},
    error::FormError,
    filters,
    middleware::RequireAdminAuth,
    models::{
        CurrentAdmin, Credentials, Product, ProductInput, ProductQuery,
        product::{CATEGORIES, CONDITIONS, status_color_for},
    },
    state::AppState,
};

const PATH: &str = "/products";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/new", get(new_page))
        .route("/products/{id}/edit", get(edit_page))
        .route("/products/{id}", post(update))
        .route("/products/{id}/delete", post(delete))
}

// =============================================================================
// Views
// =============================================================================

/// Product row for the listing.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub category: String,
    pub price: String,
    pub quantity: i64,
    pub condition: String,
    pub status_color: String,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let status_color = if product.status_color.is_empty() {
            status_color_for(&product.condition).to_string()
        } else {
            product.status_color.clone()
        };

        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.display_price(),
            quantity: product.quantity,
            condition: product.condition.clone(),
            status_color,
            image_url: product.thumbnail().map(str::to_owned),
        }
    }
}

/// Pager links, each carrying the active filters.
#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PagerView {
    #[must_use]
    pub fn new(query: &ProductQuery, pagination: &Pagination) -> Self {
        let href = |page: u32| format!("{PATH}?{}", query.with_page(page).to_query_string());
        Self {
            page: pagination.page,
            total_pages: pagination.total_pages.max(1),
            total: pagination.total,
            prev_href: pagination
                .has_previous()
                .then(|| href(pagination.page - 1)),
            next_href: pagination.has_next().then(|| href(pagination.page + 1)),
        }
    }
}

#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: ShellView,
    pub products: Vec<ProductView>,
    pub filters: FilterBar,
    pub pager: PagerView,
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub shell: ShellView,
    /// Set when editing.
    pub product_id: Option<String>,
    pub form: ProductForm,
    pub categories: Vec<FilterOption>,
    pub conditions: Vec<FilterOption>,
    pub brands: Vec<String>,
    pub error: Option<String>,
}

// =============================================================================
// Form
// =============================================================================

/// Product form as submitted. Every field arrives as text so a rejected
/// submission can be re-rendered exactly as typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: String,
    /// Image URLs, one per line.
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub condition: String,
}

impl ProductForm {
    fn blank() -> Self {
        Self {
            currency: "USD".to_string(),
            quantity: "0".to_string(),
            condition: "New".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            currency: product.currency.clone(),
            description: product.description.clone(),
            images: product.images.join("\n"),
            quantity: product.quantity.to_string(),
            condition: product.condition.clone(),
        }
    }

    /// Check the submission and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when a required field is blank or price or
    /// quantity do not parse.
    pub fn validate(&self) -> Result<ProductInput, FormError> {
        let title = self.title.trim();
        let brand = self.brand.trim();
        let category = self.category.trim();
        let price = self.price.trim();

        if title.is_empty() || brand.is_empty() || category.is_empty() || price.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let price = Decimal::from_str(price).map_err(|_| FormError::InvalidPrice)?;
        if price.is_sign_negative() {
            return Err(FormError::InvalidPrice);
        }

        let quantity = match self.quantity.trim() {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .ok()
                .filter(|q| *q >= 0)
                .ok_or(FormError::InvalidQuantity)?,
        };

        let condition = CONDITIONS
            .iter()
            .find(|c| **c == self.condition.trim())
            .copied()
            .unwrap_or("New");

        let currency = match self.currency.trim() {
            "" => "USD".to_string(),
            c => c.to_uppercase(),
        };

        Ok(ProductInput {
            title: title.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            price,
            currency,
            description: self.description.trim().to_string(),
            images: self
                .images
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
            quantity,
            condition: condition.to_string(),
            status_color: status_color_for(condition).to_string(),
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Filtered, paginated listing.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    Query(notice): Query<NoticeQuery>,
) -> Html<String> {
    let paging = PageRequest::new(query.page, query.limit);
    let query = ProductQuery {
        page: Some(paging.page),
        limit: Some(paging.limit),
        ..query
    };
    let credentials = admin.credentials();
    let mut error = notice.error;

    let (products, pagination) = match state.api().products(&credentials).list(&query).await {
        Ok(page) => (
            page.items.iter().map(ProductView::from).collect(),
            page.pagination,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            error = Some(failure_message("load products", &e));
            let pagination = Pagination {
                page: paging.page,
                limit: paging.limit,
                ..Pagination::default()
            };
            (vec![], pagination)
        }
    };

    let brands = brand_names(&state, &credentials).await;

    let template = ProductsIndexTemplate {
        shell: ShellView::load(&state, &admin, PATH).await,
        products,
        filters: product_filter_bar(&query, paging.limit, &brands),
        pager: PagerView::new(&query, &pagination),
        success: notice.success,
        error,
    };

    render(&template)
}

/// Blank create form.
#[instrument(skip(admin, state))]
pub async fn new_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    form_page(&state, &admin, None, ProductForm::blank(), None).await
}

/// Create a product. The listing only shows it after the backend confirms.
#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return form_page(&state, &admin, None, form, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    match state.api().products(&admin.credentials()).create(&input).await {
        Ok(()) => {
            tracing::info!(title = %input.title, "Product created");
            redirect_with(PATH, "success", "Product created.")
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            let message = failure_message("create the product", &e);
            form_page(&state, &admin, None, form, Some(message))
                .await
                .into_response()
        }
    }
}

/// Edit form, pre-filled from the backend.
#[instrument(skip(admin, state))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = ProductId::new(id);
    match state.api().products(&admin.credentials()).get(&id).await {
        Ok(product) => {
            let form = ProductForm::from_product(&product);
            form_page(&state, &admin, Some(&id), form, None)
                .await
                .into_response()
        }
        Err(e) => {
            tracing::error!(product_id = %id, "Failed to fetch product: {e}");
            redirect_with(PATH, "error", &failure_message("load the product", &e))
        }
    }
}

/// Save an edited product.
#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let id = ProductId::new(id);
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            return form_page(&state, &admin, Some(&id), form, Some(e.to_string()))
                .await
                .into_response();
        }
    };

    match state
        .api()
        .products(&admin.credentials())
        .update(&id, &input)
        .await
    {
        Ok(()) => {
            tracing::info!(product_id = %id, "Product updated");
            redirect_with(PATH, "success", "Product updated.")
        }
        Err(e) => {
            tracing::error!(product_id = %id, "Failed to update product: {e}");
            let message = failure_message("update the product", &e);
            form_page(&state, &admin, Some(&id), form, Some(message))
                .await
                .into_response()
        }
    }
}

/// Delete a product and return to the listing.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = ProductId::new(id);
    match state.api().products(&admin.credentials()).delete(&id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "Product deleted");
            redirect_with(PATH, "success", "Product deleted.")
        }
        Err(e) => {
            tracing::error!(product_id = %id, "Failed to delete product: {e}");
            redirect_with(PATH, "error", &failure_message("delete the product", &e))
        }
    }
}

async fn form_page(
    state: &AppState,
    admin: &CurrentAdmin,
    product_id: Option<&ProductId>,
    form: ProductForm,
    error: Option<String>,
) -> Html<String> {
    let brands = brand_names(state, &admin.credentials()).await;
    let template = ProductFormTemplate {
        shell: ShellView::load(state, admin, PATH).await,
        product_id: product_id.map(ToString::to_string),
        categories: FilterOption::list(CATEGORIES, &form.category),
        conditions: FilterOption::list(CONDITIONS, &form.condition),
        form,
        brands,
        error,
    };
    render(&template)
}

/// Brand names for the brand pickers. Empty when brands cannot be loaded;
/// the pickers then accept free text.
async fn brand_names(state: &AppState, credentials: &Credentials) -> Vec<String> {
    match state.api().brands(credentials).list().await {
        Ok(brands) => brands.into_iter().map(|b| b.name).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch brands for product form: {e}");
            vec![]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            title: " Bilge Pump 1100 ".to_string(),
            brand: "Rule".to_string(),
            category: "Pumps".to_string(),
            price: "89.50".to_string(),
            currency: "usd".to_string(),
            description: String::new(),
            images: "https://cdn.example.com/a.jpg\n\n https://cdn.example.com/b.jpg ".to_string(),
            quantity: String::new(),
            condition: "Refurbished".to_string(),
        }
    }

    #[test]
    fn test_validate_builds_input() {
        let input = filled().validate().unwrap();
        assert_eq!(input.title, "Bilge Pump 1100");
        assert_eq!(input.price, Decimal::new(8950, 2));
        assert_eq!(input.currency, "USD");
        assert_eq!(input.quantity, 0);
        assert_eq!(input.images.len(), 2);
        assert_eq!(input.status_color, "bg-success");
    }

    #[test]
    fn test_validate_requires_fields() {
        let clears: [fn(&mut ProductForm); 4] = [
            |f| f.title.clear(),
            |f| f.brand = "  ".to_string(),
            |f| f.category.clear(),
            |f| f.price.clear(),
        ];
        for clear in clears {
            let mut form = filled();
            clear(&mut form);
            assert_eq!(form.validate(), Err(FormError::MissingRequired));
        }
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut form = filled();
        form.price = "eighty".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice));
        form.price = "-1".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice));

        let mut form = filled();
        form.quantity = "2.5".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidQuantity));
    }

    #[test]
    fn test_unknown_condition_falls_back_to_new() {
        let mut form = filled();
        form.condition = "Used".to_string();
        let input = form.validate().unwrap();
        assert_eq!(input.condition, "New");
        assert_eq!(input.status_color, "bg-accent");
    }

    #[test]
    fn test_pager_links_keep_filters() {
        let query = ProductQuery {
            page: Some(2),
            limit: Some(20),
            category: Some("Pumps".to_string()),
            ..ProductQuery::default()
        };
        let pagination = Pagination {
            page: 2,
            limit: 20,
            total: 45,
            total_pages: 3,
        };
        let pager = PagerView::new(&query, &pagination);
        assert_eq!(
            pager.prev_href.as_deref(),
            Some("/products?page=1&limit=20&category=Pumps")
        );
        assert_eq!(
            pager.next_href.as_deref(),
            Some("/products?page=3&limit=20&category=Pumps")
        );

        let last = Pagination {
            page: 3,
            ..pagination
        };
        assert!(PagerView::new(&query, &last).next_href.is_none());
    }
}
