#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use livease_admin::api::Gateway;
use livease_admin::auth::Session;

pub const ADMIN_EMAIL: &str = "ops@livease.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Shared state of the stub backend
#[derive(Clone)]
pub struct Stub {
    pub hits: Arc<AtomicUsize>,
    /// When set, every user listing answers 503
    pub lists_down: Arc<AtomicBool>,
    pub tenants: Arc<Mutex<Vec<Value>>>,
    pub saved_scrapes: Arc<Mutex<Vec<Value>>>,
}

impl Stub {
    fn with_tenants(total: usize) -> Self {
        let tenants = (1..=total)
            .map(|i| {
                json!({
                    "_id": format!("t{}", i),
                    "name": format!("Tenant {}", i),
                    "email": format!("tenant{}@mail.com", i),
                    "number": format!("90000{:05}", i),
                    "location": if i % 2 == 0 { "Pune" } else { "Goa" },
                })
            })
            .collect();
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            lists_down: Arc::new(AtomicBool::new(false)),
            tenants: Arc::new(Mutex::new(tenants)),
            saved_scrapes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_lists_down(&self, down: bool) {
        self.lists_down.store(down, Ordering::SeqCst);
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Stub,
}

impl StubBackend {
    pub fn gateway(&self, session: Session) -> Gateway {
        Gateway::new(&self.base_url, session, Duration::from_secs(5)).expect("stub URL parses")
    }

    pub fn anonymous(&self) -> Gateway {
        self.gateway(Session::anonymous())
    }

    pub fn signed_in(&self) -> Gateway {
        self.gateway(Session::new(mint_token("Priya Admin"), Some(ADMIN_EMAIL.to_string())))
    }
}

/// Start a stub LivEase backend with 25 tenants on a free local port
pub async fn spawn_backend() -> Result<StubBackend> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let state = Stub::with_tenants(25);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind stub backend")?;
    let app = router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(StubBackend {
        base_url: format!("http://127.0.0.1:{}/api/v1", port),
        state,
    })
}

/// HS256 token whose payload carries the display claims the client reads
pub fn mint_token(name: &str) -> String {
    let claims = json!({
        "user_id": "admin-1",
        "user_name": name,
        "email": ADMIN_EMAIL,
        "account_type": "Admin",
        "exp": 4_102_444_800u64,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"stub-secret")).expect("token encodes")
}

fn router(state: Stub) -> Router {
    let api = Router::new()
        .route("/admin/signInPassword", post(sign_in))
        .route("/admin/getUsers/:account_type", get(get_users))
        .route("/admin/addUser", post(add_user))
        .route("/admin/updateUser/:id", put(update_user))
        .route("/user/:id", get(get_profile))
        .route("/property/userProperties", get(user_properties))
        .route("/property/scraped", post(save_scraped))
        .route("/scraping/facebook", post(scrape_facebook))
        .route("/profile/uploadAsset", post(echo_upload))
        .route("/admin/dashboard/stats", get(dashboard_stats))
        .route("/admin/dashboard/matchingMetrics", get(matching_metrics))
        .route("/admin/dashboard/recentActivity", get(recent_activity))
        .route("/admin/dashboard/supportTickets", get(support_tickets))
        .route("/test/echo", get(echo_headers).post(echo_headers))
        .route("/test/missing", get(not_found))
        .route("/test/error-field", get(error_field))
        .route("/test/empty-error", get(empty_error))
        .route("/test/empty", get(empty_ok))
        .route("/test/not-json", get(not_json))
        .with_state(state);

    Router::new().nest("/api/v1", api)
}

async fn sign_in(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.hit();
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        (StatusCode::OK, Json(json!({ "token": mint_token("Priya Admin") })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid email or password" })))
    }
}

async fn get_users(
    State(stub): State<Stub>,
    Path(account_type): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    stub.hit();
    if stub.lists_down.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "Service temporarily unavailable" })),
        );
    }
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    if page == 0 || limit == 0 {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid page" })));
    }

    let all = if account_type == "Tenant" {
        stub.tenants.lock().expect("tenants lock").clone()
    } else {
        Vec::new()
    };
    let total_pages = all.len().div_ceil(limit).max(1);
    let users: Vec<Value> = all.into_iter().skip((page - 1) * limit).take(limit).collect();

    (
        StatusCode::OK,
        Json(json!({ "users": users, "current_page": page, "total_pages": total_pages })),
    )
}

async fn add_user(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    stub.hit();
    if headers.get("x-authorization-token").is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })));
    }
    let email = body["email"].as_str().unwrap_or_default();
    let mut tenants = stub.tenants.lock().expect("tenants lock");
    if tenants.iter().any(|t| t["email"] == email) {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Account already exists" })));
    }

    let mut user = body.clone();
    user["_id"] = json!(format!("t{}", tenants.len() + 1));
    // newest first, like the real listing
    tenants.insert(0, user.clone());
    (StatusCode::CREATED, Json(json!({ "user": user })))
}

async fn update_user(State(stub): State<Stub>, Path(id): Path<String>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.hit();
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" })));
    }
    (StatusCode::OK, Json(json!({ "user": { "_id": id, "update": body } })))
}

async fn get_profile(State(stub): State<Stub>, Path(id): Path<String>) -> impl IntoResponse {
    stub.hit();
    match id.as_str() {
        "missing" => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))),
        "blank" => (StatusCode::OK, Json(json!({ "data": {} }))),
        _ => (
            StatusCode::OK,
            Json(json!({ "data": { "_id": id, "name": "Ravi Landlord", "account_type": "Landlord" } })),
        ),
    }
}

async fn user_properties(State(stub): State<Stub>, Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
    stub.hit();
    let properties = match query.get("userId").map(String::as_str) {
        Some("l1") => json!([
            { "_id": "p1", "title": "Sea View 2BHK", "location": "Goa" },
            { "_id": "p2", "title": "Studio", "location": "Pune" },
        ]),
        _ => json!([]),
    };
    Json(json!({ "properties": properties }))
}

async fn scrape_facebook(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.hit();
    let limit = body["limit"].as_u64().unwrap_or(10) as usize;
    let rows: Vec<Value> = (1..=3)
        .take(limit)
        .map(|i| {
            json!({
                "property": format!("{}BHK near Baner", i),
                "facebookUrl": format!("https://facebook.com/groups/pune/posts/{}", i),
                "listedBy": if i == 2 { Value::Null } else { json!("Meera") },
                "rent": 15000 + i * 1000,
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "data": rows })))
}

async fn save_scraped(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.hit();
    if body["property"] == "2BHK near Baner" {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "message": "Duplicate listing" })));
    }
    stub.saved_scrapes.lock().expect("scrapes lock").push(body.clone());
    (StatusCode::CREATED, Json(json!({ "property": body })))
}

async fn echo_upload(headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "content_type": header(&headers, "content-type"),
        "token": header(&headers, "x-authorization-token"),
        "bytes": body.len(),
        "url": "https://cdn.livease.test/uploads/file.png",
    }))
}

async fn dashboard_stats() -> Json<Value> {
    Json(json!({ "data": {
        "total_tenants": 1250,
        "total_landlords": 310,
        "total_properties": 742,
        "total_payments": 1234567.0,
    }}))
}

async fn matching_metrics() -> Json<Value> {
    Json(json!({ "total_matches": 88, "total_superlikes": 1400, "properties_shared": 52 }))
}

async fn recent_activity(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let rows: Vec<Value> = (1..=20)
        .take(limit)
        .map(|i| json!({ "name": format!("User {}", i), "action": "signed up", "time": "2025-03-04T09:15:00Z" }))
        .collect();
    Json(json!({ "data": rows }))
}

async fn support_tickets(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(5);
    let rows: Vec<Value> = (1..=8).take(limit).map(|i| json!({ "_id": format!("k{}", i) })).collect();
    Json(json!({ "data": rows }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "token": header(&headers, "x-authorization-token"),
        "content_type": header(&headers, "content-type"),
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

async fn error_field() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid page" })))
}

async fn empty_error() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})))
}

async fn empty_ok() -> StatusCode {
    StatusCode::OK
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}
