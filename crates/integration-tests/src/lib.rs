//! Integration test harness for the Bluewater admin panel.
//!
//! Each test starts two servers on ephemeral ports: a [`FakeBackend`] that
//! speaks the REST backend's wire format and records every request it
//! receives, and the real admin app pointed at it. Tests drive the admin
//! over HTTP with a cookie-keeping client that does not follow redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bluewater-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::redirect::Policy;
use secrecy::SecretString;
use serde_json::{Value, json};

use bluewater_admin::{
    app,
    config::{AdminConfig, BackendConfig},
    state::AppState,
};

/// Email and password the fake backend accepts.
pub const ADMIN_EMAIL: &str = "ops@bluewater-supply.com";
pub const ADMIN_PASSWORD: &str = "harbor-lights";
/// Token the fake backend issues on login.
pub const ADMIN_TOKEN: &str = "tok-integration";

/// One request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// First value of a query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Body parsed as JSON, or `Null` when it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// What the fake backend serves and how it answers.
#[derive(Debug, Clone)]
pub struct BackendData {
    pub products: Vec<Value>,
    /// `totalPages` reported by the product listing.
    pub product_pages: u32,
    pub brands: Vec<Value>,
    pub quotes: Vec<Value>,
    pub users: Vec<Value>,
    /// Status for product deletes; on `200` the product is removed.
    pub product_delete_status: StatusCode,
    /// Status for brand create, update and delete; applied on success.
    pub brand_write_status: StatusCode,
    /// Status for `PUT /users/{id}`.
    pub user_update_status: StatusCode,
    /// Status for `GET /ebay/oauth` without a code.
    pub ebay_probe_status: StatusCode,
    /// Status for `GET /ebay/oauth` with a code.
    pub ebay_exchange_status: StatusCode,
    /// Pages the eBay sync reports.
    pub ebay_pages: u32,
    /// Products added per synced page.
    pub ebay_per_page: u64,
    /// Page whose sync request fails with `500`.
    pub ebay_fail_on_page: Option<u32>,
}

impl Default for BackendData {
    fn default() -> Self {
        Self {
            products: vec![
                json!({"id": 1, "title": "Bilge Pump 1100", "brand": "Rule", "category": "Pumps",
                       "price": 89.5, "currency": "USD", "images": [], "quantity": 4,
                       "condition": "New", "statusColor": "bg-accent"}),
                json!({"id": 2, "title": "VHF Radio GX1400", "brand": "Standard Horizon",
                       "category": "Electronics", "price": "199.99", "currency": "USD",
                       "images": null, "quantity": "2", "condition": "Refurbished",
                       "statusColor": "bg-success"}),
            ],
            product_pages: 1,
            brands: vec![
                json!({"id": 10, "name": "Rule", "description": "Bilge pumps", "logoUrl": "",
                       "faq": ["Warranty?"]}),
            ],
            quotes: vec![
                json!({"id": 5, "name": "Harbor Marine", "email": "buy@harbor-marine.com",
                       "phone": "555-0100", "budget": 2500, "message": "Two pumps please",
                       "date": "2025-03-02", "status": "pending", "pid": 1}),
                json!({"id": 6, "name": "Dockside Ltd", "email": "ops@dockside.com",
                       "budget": "900", "message": "Radio", "date": "2025-03-01",
                       "status": "approved"}),
            ],
            users: vec![
                json!({"id": 7, "name": "Dock Master", "email": ADMIN_EMAIL}),
                json!({"id": 8, "name": "Quartermaster", "email": "qm@bluewater-supply.com"}),
            ],
            product_delete_status: StatusCode::OK,
            brand_write_status: StatusCode::OK,
            user_update_status: StatusCode::OK,
            ebay_probe_status: StatusCode::OK,
            ebay_exchange_status: StatusCode::OK,
            ebay_pages: 3,
            ebay_per_page: 10,
            ebay_fail_on_page: None,
        }
    }
}

/// In-process stand-in for the REST backend, laid out as
/// [`BackendConfig::single_origin`] expects.
#[derive(Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<BackendData>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    #[must_use]
    pub fn new(data: BackendData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            requests: Arc::default(),
        }
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Requests with the given method and path.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Change what the backend serves mid-test.
    pub fn update(&self, f: impl FnOnce(&mut BackendData)) {
        f(&mut lock(&self.data));
    }

    fn data(&self) -> MutexGuard<'_, BackendData> {
        lock(&self.data)
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/auth/login", axum::routing::post(login))
            .route("/products", get(list_products))
            .route("/products/add", axum::routing::post(accept_created))
            .route(
                "/products/{id}",
                get(get_product).put(accept_ok).delete(delete_product),
            )
            .route("/brands", get(list_brands).post(create_brand))
            .route("/brands/{id}", axum::routing::put(update_brand).delete(delete_brand))
            .route("/quotes", get(list_quotes))
            .route("/users", get(list_users).post(accept_created))
            .route("/users/{id}", axum::routing::put(update_user).delete(accept_ok))
            .route("/ebay/oauth", get(ebay_oauth))
            .route("/ebay/products", get(ebay_sync_page))
            .route("/admin/dashboard/stats", get(dashboard_stats))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Canonical string form of a JSON id.
fn id_of(value: &Value) -> String {
    match &value["id"] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn record(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    lock(&backend.requests).push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_owned),
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        Json(json!({"admin": {"id": 7, "name": "Dock Master"}, "token": ADMIN_TOKEN}))
            .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"})))
            .into_response()
    }
}

async fn list_products(
    State(backend): State<FakeBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let data = backend.data();
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    Json(json!({
        "items": data.products,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": data.products.len(),
            "totalPages": data.product_pages,
        }
    }))
}

async fn get_product(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    let data = backend.data();
    match data.products.iter().find(|p| id_of(p) == id) {
        Some(product) => Json(json!({"product": product})).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Product not found"})))
            .into_response(),
    }
}

async fn delete_product(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    let mut data = backend.data();
    let status = data.product_delete_status;
    if status == StatusCode::OK {
        data.products.retain(|p| id_of(p) != id);
        Json(json!({"message": "deleted"})).into_response()
    } else {
        (status, Json(json!({"message": "Product is referenced by an open RFQ"}))).into_response()
    }
}

async fn accept_ok() -> Json<Value> {
    Json(json!({"message": "ok"}))
}

async fn accept_created() -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({"message": "created"})))
}

async fn list_brands(State(backend): State<FakeBackend>) -> Json<Value> {
    Json(json!({"brands": backend.data().brands}))
}

fn brand_refusal(status: StatusCode) -> Response {
    (status, Json(json!({"message": "Brand name already exists"}))).into_response()
}

async fn create_brand(State(backend): State<FakeBackend>, Json(mut brand): Json<Value>) -> Response {
    let mut data = backend.data();
    let status = data.brand_write_status;
    if !status.is_success() {
        return brand_refusal(status);
    }
    let next_id = data
        .brands
        .iter()
        .filter_map(|b| id_of(b).parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    brand["id"] = json!(next_id);
    data.brands.push(brand);
    (status, Json(json!({"message": "created"}))).into_response()
}

async fn update_brand(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(mut update): Json<Value>,
) -> Response {
    let mut data = backend.data();
    let status = data.brand_write_status;
    if !status.is_success() {
        return brand_refusal(status);
    }
    if let Some(brand) = data.brands.iter_mut().find(|b| id_of(b) == id) {
        update["id"] = brand["id"].clone();
        *brand = update;
    }
    (status, Json(json!({"message": "updated"}))).into_response()
}

async fn delete_brand(State(backend): State<FakeBackend>, Path(id): Path<String>) -> Response {
    let mut data = backend.data();
    let status = data.brand_write_status;
    if !status.is_success() {
        return brand_refusal(status);
    }
    data.brands.retain(|b| id_of(b) != id);
    (status, Json(json!({"message": "deleted"}))).into_response()
}

async fn update_user(State(backend): State<FakeBackend>) -> Response {
    let status = backend.data().user_update_status;
    if status == StatusCode::OK {
        Json(json!({"message": "updated"})).into_response()
    } else {
        (status, Json(json!({"message": "Email already in use"}))).into_response()
    }
}

async fn list_quotes(State(backend): State<FakeBackend>) -> Json<Value> {
    Json(json!({"quotes": backend.data().quotes}))
}

async fn list_users(State(backend): State<FakeBackend>) -> Json<Value> {
    Json(json!({"users": backend.data().users}))
}

async fn ebay_oauth(
    State(backend): State<FakeBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let data = backend.data();
    match params.get("code") {
        Some(code) if !code.is_empty() => data.ebay_exchange_status,
        _ => data.ebay_probe_status,
    }
}

async fn ebay_sync_page(
    State(backend): State<FakeBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let data = backend.data();
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    if data.ebay_fail_on_page == Some(page) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "eBay API timeout"})),
        )
            .into_response();
    }
    Json(json!({
        "synced": u64::from(page) * data.ebay_per_page,
        "totalPages": data.ebay_pages,
    }))
    .into_response()
}

async fn dashboard_stats(State(backend): State<FakeBackend>) -> Json<Value> {
    let data = backend.data();
    let pending = data
        .quotes
        .iter()
        .filter(|q| q["status"] == "pending")
        .count();
    Json(json!({
        "products": data.products.len(),
        "brands": data.brands.len(),
        "quotes": data.quotes.len(),
        "pendingQuotes": pending,
        "users": data.users.len(),
    }))
}

/// Bind an ephemeral port and serve `router` in the background.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    addr
}

/// A running admin app wired to a fake backend.
pub struct TestApp {
    pub admin_url: String,
    pub backend: FakeBackend,
    /// Keeps cookies, never follows redirects.
    pub client: reqwest::Client,
}

impl TestApp {
    /// Admin app against a backend with the default data.
    pub async fn spawn() -> Self {
        Self::spawn_with(BackendData::default()).await
    }

    /// Admin app against a backend serving `data`.
    pub async fn spawn_with(data: BackendData) -> Self {
        let backend = FakeBackend::new(data);
        let backend_addr = serve(backend.router()).await;
        let config = AdminConfig::for_backend(BackendConfig::single_origin(&format!(
            "http://{backend_addr}"
        )));
        Self::start(config, backend).await
    }

    /// Admin app against a backend serving `data`, with the eBay connect
    /// button pointing at `oauth_url`.
    pub async fn spawn_with_oauth_url(data: BackendData, oauth_url: &str) -> Self {
        let backend = FakeBackend::new(data);
        let backend_addr = serve(backend.router()).await;
        let mut config = AdminConfig::for_backend(BackendConfig::single_origin(&format!(
            "http://{backend_addr}"
        )));
        config.ebay_oauth_url = Some(SecretString::from(oauth_url.to_string()));
        Self::start(config, backend).await
    }

    /// Admin app whose backend is not listening.
    pub async fn spawn_unreachable() -> Self {
        // Port 9 (discard) is closed on test hosts.
        let config = AdminConfig::for_backend(BackendConfig::single_origin("http://127.0.0.1:9"));
        Self::start(config, FakeBackend::default()).await
    }

    async fn start(config: AdminConfig, backend: FakeBackend) -> Self {
        let state = AppState::new(config).expect("Failed to build admin state");
        let admin_addr = serve(app(state)).await;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            admin_url: format!("http://{admin_addr}"),
            backend,
            client,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Submit the login form with the given credentials.
    pub async fn login_as(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_form("/signup", &[("email", email), ("password", password)])
            .await
    }

    /// Sign in with the credentials the fake backend accepts.
    pub async fn login(&self) -> reqwest::Response {
        let response = self.login_as(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(location(&response), "/dashboard", "login did not succeed");
        response
    }
}

/// `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
