//! Shared test fixtures for the storefront SDK integration tests.
//!
//! Provides `MockBackend::start()`, which serves the customer, product and
//! order endpoints from an in-process axum router on a background thread,
//! with knobs for forcing the failure modes the client has to cope with.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use storefront_sdk::StorefrontClient;

/// How `POST /orders/` should misbehave.
#[derive(Debug, Clone)]
pub enum OrderFailure {
    /// Non-success status with `{"detail": ...}`.
    Detail(u16, String),
    /// Non-success status with an HTML page, as a proxy would send.
    Html(u16),
    /// `200 OK` with a body that is not JSON.
    Garbage,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub customers: Vec<Value>,
    pub products: Vec<Value>,
    pub orders: Vec<Value>,
    next_id: i64,
    /// Every body received on `POST /orders/`, including rejected ones.
    pub order_requests: Vec<Value>,
    pub order_failure: Option<OrderFailure>,
    /// Serve `GET /customers/` as an HTML page.
    pub html_customers: bool,
    /// Serve this value from `GET /products/` instead of the product list.
    pub products_override: Option<Value>,
    /// Answer `GET /orders/` with this status and an empty body.
    pub orders_list_status: Option<u16>,
    /// `(product_id, body bytes)` per image upload.
    pub uploads: Vec<(i64, Vec<u8>)>,
}

impl BackendState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

impl MockBackend {
    /// Bind an ephemeral port and start serving on a background thread.
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let app = router(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// A blocking client pointed at this backend.
    pub fn client(&self) -> StorefrontClient {
        StorefrontClient::builder()
            .base_url(&self.base_url)
            .build()
            .unwrap()
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    /// Insert a product directly and return its id.
    pub fn seed_product(&self, name: &str, price: f64, stock: i64) -> i64 {
        let mut st = self.state();
        let id = st.next_id();
        st.products.push(json!({
            "product_id": id,
            "name": name,
            "price": price,
            "stock_quantity": stock,
            "description": null,
            "image_url": null
        }));
        id
    }

    /// Insert a customer directly and return its id.
    pub fn seed_customer(&self, email: &str) -> i64 {
        let mut st = self.state();
        let id = st.next_id();
        st.customers.push(json!({
            "customer_id": id,
            "email": email,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone_number": null,
            "shipping_address": "1 Main St"
        }));
        id
    }

    pub fn fail_orders_with(&self, failure: OrderFailure) {
        self.state().order_failure = Some(failure);
    }

    pub fn order_requests(&self) -> Vec<Value> {
        self.state().order_requests.clone()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/customers/", get(list_customers).post(create_customer))
        .route("/customers/{id}", axum::routing::delete(delete_customer))
        .route("/products/", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).delete(delete_product))
        .route("/products/{id}/upload-image", post(upload_image))
        .route("/orders/", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order).delete(delete_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn html(status: StatusCode) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body><h1>502 Bad Gateway</h1></body></html>",
    )
        .into_response()
}

/// Prices are stored as numbers by `seed_product` and as decimal strings by
/// `POST /products/`.
fn price_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn find(records: &[Value], key: &str, id: i64) -> Option<Value> {
    records.iter().find(|r| r[key] == id).cloned()
}

fn remove(records: &mut Vec<Value>, key: &str, id: i64) -> bool {
    let before = records.len();
    records.retain(|r| r[key] != id);
    records.len() != before
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

async fn list_customers(State(s): State<Shared>) -> Response {
    let st = s.lock().unwrap();
    if st.html_customers {
        return html(StatusCode::OK);
    }
    Json(Value::Array(st.customers.clone())).into_response()
}

async fn create_customer(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().unwrap();
    if st.customers.iter().any(|c| c["email"] == body["email"]) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let id = st.next_id();
    let mut record = body;
    if let Some(obj) = record.as_object_mut() {
        obj.remove("password");
        obj.insert("customer_id".into(), json!(id));
    }
    st.customers.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn delete_customer(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut st = s.lock().unwrap();
    if remove(&mut st.customers, "customer_id", id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Customer not found")
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

async fn list_products(State(s): State<Shared>) -> Response {
    let st = s.lock().unwrap();
    match &st.products_override {
        Some(value) => Json(value.clone()).into_response(),
        None => Json(Value::Array(st.products.clone())).into_response(),
    }
}

/// Prices come back as decimal strings, the way a Decimal column serializes.
async fn create_product(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().unwrap();
    let id = st.next_id();
    let price = body["price"].as_f64().unwrap_or_default();
    let record = json!({
        "product_id": id,
        "name": body["name"],
        "price": format!("{:.2}", price),
        "stock_quantity": body["stock_quantity"],
        "description": body["description"],
        "image_url": null
    });
    st.products.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn get_product(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    let st = s.lock().unwrap();
    match find(&st.products, "product_id", id) {
        Some(p) => Json(p).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn delete_product(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut st = s.lock().unwrap();
    if remove(&mut st.products, "product_id", id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Product not found")
    }
}

async fn upload_image(State(s): State<Shared>, Path(id): Path<i64>, body: Bytes) -> Response {
    let mut st = s.lock().unwrap();
    st.uploads.push((id, body.to_vec()));
    match st.products.iter_mut().find(|p| p["product_id"] == id) {
        Some(p) => {
            p["image_url"] = json!(format!("https://images.example/products/{}.jpg", id));
            Json(p.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Product not found"),
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

async fn list_orders(State(s): State<Shared>) -> Response {
    let st = s.lock().unwrap();
    if let Some(code) = st.orders_list_status {
        return StatusCode::from_u16(code).unwrap().into_response();
    }
    Json(Value::Array(st.orders.clone())).into_response()
}

async fn create_order(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().unwrap();
    st.order_requests.push(body.clone());

    match st.order_failure.clone() {
        Some(OrderFailure::Detail(code, message)) => {
            return detail(StatusCode::from_u16(code).unwrap(), &message)
        }
        Some(OrderFailure::Html(code)) => return html(StatusCode::from_u16(code).unwrap()),
        Some(OrderFailure::Garbage) => return (StatusCode::OK, "OK").into_response(),
        None => {}
    }

    let items = body["items"].as_array().cloned().unwrap_or_default();
    let total: f64 = items
        .iter()
        .map(|item| {
            let price = find(&st.products, "product_id", item["product_id"].as_i64().unwrap_or(-1))
                .and_then(|p| price_of(&p["price"]))
                .unwrap_or_default();
            price * item["quantity"].as_f64().unwrap_or_default()
        })
        .sum();

    let id = st.next_id();
    let record = json!({
        "order_id": id,
        "customer_id": body["customer_id"],
        "status": "pending",
        "shipping_address": body["shipping_address"],
        "items": items,
        "total_price": total,
        "created_at": "2024-05-01T12:00:00Z"
    });
    st.orders.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn get_order(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    let st = s.lock().unwrap();
    match find(&st.orders, "order_id", id) {
        Some(o) => Json(o).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Order not found"),
    }
}

async fn update_order_status(
    State(s): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut st = s.lock().unwrap();
    match st.orders.iter_mut().find(|o| o["order_id"] == id) {
        Some(o) => {
            o["status"] = body["status"].clone();
            Json(o.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Order not found"),
    }
}

async fn delete_order(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut st = s.lock().unwrap();
    if remove(&mut st.orders, "order_id", id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Order not found")
    }
}
