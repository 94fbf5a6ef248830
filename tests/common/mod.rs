#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use storefront_client::{config::AppConfig, session::MemoryStore, state::AppState};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

/// In-process stand-in for the storefront REST backend.
#[derive(Clone, Default)]
pub struct Backend {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    orders: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_path(&self, path: &str) -> Option<SeenRequest> {
        self.seen().into_iter().find(|r| r.path == path)
    }

    /// Bodies received by `POST /orders`.
    pub fn order_bodies(&self) -> Vec<Value> {
        self.orders.lock().unwrap().clone()
    }
}

pub async fn spawn_backend() -> anyhow::Result<(String, Backend)> {
    let backend = Backend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok((format!("http://{addr}"), backend))
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub fn app_state(config: AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(config, Arc::new(MemoryStore::new()))?)
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/user", get(get_user).put(put_user))
        .route("/user/upload-picture", post(upload_picture))
        .route("/categories/listAll", get(categories))
        .route("/combos/listAll", get(all_combos))
        .route("/combos/searchByType", get(combos_by_type))
        .route("/products/searchByCategoryId/{id}", get(products_by_category))
        .route("/products/searchById/{id}", get(product_by_id))
        .route("/vouchers/code/{code}", get(voucher))
        .route("/orders", get(list_orders).post(create_order))
        .route("/admin/get-all-users", get(admin_users))
        .route("/admin/products/{id}", delete(admin_delete_product))
        .route("/slow", get(slow))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

async fn record(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let seen = {
        let header_value = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        SeenRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header_value("authorization"),
            request_id: header_value("x-request-id"),
        }
    };
    backend.seen.lock().unwrap().push(seen);
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn admin_user() -> Value {
    json!({ "id": 1, "name": "Ada Admin", "email": "admin@example.com", "role": "admin" })
}

fn member_user() -> Value {
    json!({
        "id": 2,
        "name": "Minh Nguyen",
        "email": "user@example.com",
        "role": "user",
        "phone": "0901234567"
    })
}

fn user_for(headers: &HeaderMap) -> Option<Value> {
    match headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        Some("Bearer access-admin") => Some(admin_user()),
        Some("Bearer access-member") => Some(member_user()),
        _ => None,
    }
}

fn tokens_for(email: &str) -> Value {
    let access = if email.starts_with("admin") {
        "access-admin"
    } else {
        "access-member"
    };
    json!({ "accessToken": access, "refreshToken": "refresh-token" })
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some("secret") {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    Json(tokens_for(email)).into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email == "taken@example.com" {
        return error(StatusCode::CONFLICT, "Email already exists");
    }
    Json(tokens_for(email)).into_response()
}

async fn get_user(headers: HeaderMap) -> Response {
    match user_for(&headers) {
        Some(user) => Json(user).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Invalid or expired token"),
    }
}

async fn put_user(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let Some(mut user) = user_for(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Invalid or expired token");
    };
    if let Some(name) = body.get("name") {
        user["name"] = name.clone();
    }
    if let Some(phone) = body.get("phone") {
        user["phone"] = phone.clone();
    }
    Json(user).into_response()
}

async fn upload_picture(headers: HeaderMap, mut multipart: Multipart) -> Response {
    let Some(mut user) = user_for(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Invalid or expired token");
    };
    let mut size = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        }
    }
    if size == 0 {
        return error(StatusCode::BAD_REQUEST, "No file uploaded");
    }
    user["avatarUrl"] = json!(format!("https://cdn.example.com/avatar-{size}.png"));
    Json(user).into_response()
}

async fn categories() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Burgers", "imageUrl": "https://img.example.com/burgers.png" },
        { "id": 2, "name": "Drinks" }
    ]))
}

async fn all_combos() -> Json<Value> {
    Json(json!([
        { "id": 100, "name": "Family combo", "price": 199000, "imageUrl": "", "type": "family" }
    ]))
}

async fn combos_by_type(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let kind = query.get("type").cloned().unwrap_or_default();
    Json(json!([
        { "id": 101, "name": "Solo combo", "price": 89000, "imageUrl": "", "type": kind }
    ]))
}

fn product(id: i64, category_id: i64) -> Value {
    let (name, price) = match id {
        10 => ("Cheeseburger", 50000),
        11 => ("Iced tea", 30000),
        _ => ("Fries", 25000),
    };
    json!({
        "id": id,
        "name": name,
        "price": price,
        "imageUrl": format!("https://img.example.com/{id}.png"),
        "categoryId": category_id
    })
}

async fn products_by_category(Path(id): Path<i64>) -> Json<Value> {
    Json(json!([product(10, id), product(11, id)]))
}

async fn product_by_id(Path(id): Path<i64>) -> Json<Value> {
    Json(product(id, 1))
}

async fn voucher(Path(code): Path<String>) -> Response {
    if code == "SAVE20" {
        Json(json!({ "id": 7, "code": "SAVE20", "discount": 20000 })).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Voucher not found")
    }
}

fn order_response(id: usize, body: &Value) -> Value {
    json!({
        "id": id,
        "status": "pending",
        "totalPayment": body["totalPayment"],
        "paymentMethod": body["paymentMethod"],
        "createdAt": "2026-01-01T08:00:00Z",
        "items": body["orderItems"]
    })
}

async fn create_order(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    let mut orders = backend.orders.lock().unwrap();
    orders.push(body.clone());
    Json(order_response(orders.len(), &body))
}

async fn list_orders(State(backend): State<Backend>) -> Json<Value> {
    let orders = backend.orders.lock().unwrap();
    let list: Vec<Value> = orders
        .iter()
        .enumerate()
        .map(|(index, body)| order_response(index + 1, body))
        .collect();
    Json(Value::Array(list))
}

async fn admin_users(headers: HeaderMap) -> Response {
    match user_for(&headers) {
        Some(user) if user["role"] == "admin" => {
            Json(json!([admin_user(), member_user()])).into_response()
        }
        _ => error(StatusCode::FORBIDDEN, "Admin only"),
    }
}

async fn admin_delete_product(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    match user_for(&headers) {
        Some(user) if user["role"] == "admin" => {
            Json(json!({ "message": format!("Product {id} deleted") })).into_response()
        }
        _ => error(StatusCode::FORBIDDEN, "Admin only"),
    }
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([]))
}
