#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]
//! Mock wash backend for client integration testing
//!
//! Serves the subset of the admin/app REST API the client tests touch,
//! with bearer-token checks and mutable in-memory state.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub const ROOT_EMAIL: &str = "root@wash.uz";
pub const PARTNER_EMAIL: &str = "partner@wash.uz";
pub const PASSWORD: &str = "secret";
pub const DEV_OTP: &str = "1234";

/// One write request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

/// Mock backend state
#[derive(Debug, Default)]
pub struct MockState {
    pub tokens: HashMap<String, Value>,
    pub app_tokens: HashSet<String>,
    /// Profiles of app users, by token
    pub app_users: HashMap<String, Value>,
    pub branches: Vec<Value>,
    pub kiosks: Vec<Value>,
    /// Generic admin collections (organizations, accounts, services, ...)
    pub records: HashMap<String, Vec<Value>>,
    pub payments: Vec<Value>,
    /// Query strings of payment list/summary requests, by path
    pub payment_queries: Vec<(String, Option<String>)>,
    pub requests: Vec<Recorded>,
    /// App branch list answers with an object instead of an array
    pub app_branches_not_array: bool,
    pub sessions: Vec<Value>,
    pub last_kiosk_update: Option<Value>,
    pub session_queries: Vec<Option<String>>,
    /// Delay of wash-session responses, per status filter
    pub session_delay: HashMap<String, Duration>,
    pub fail_sessions: bool,
    pub uploads: Vec<Bytes>,
}

pub type SharedState = Arc<RwLock<MockState>>;

pub struct MockBackend {
    addr: SocketAddr,
    state: SharedState,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Start a mock backend on a random port
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(RwLock::new(MockState::default()));
        let app = Router::new()
            .route("/api/v1/admin/auth/login", post(login))
            .route("/api/v1/admin/auth/me", get(me))
            .route("/api/v1/admin/branches", get(list_branches).post(create_branch))
            .route(
                "/api/v1/admin/branches/{id}",
                delete(delete_branch).put(update_branch),
            )
            .route("/api/v1/admin/organizations", get(list_records).post(create_record))
            .route("/api/v1/admin/organizations/{id}", put(update_record))
            .route("/api/v1/admin/accounts", get(list_records).post(create_record))
            .route("/api/v1/admin/accounts/{id}", put(update_record))
            .route("/api/v1/admin/services", get(list_records).post(create_record))
            .route("/api/v1/admin/services/{id}", put(update_record))
            .route("/api/v1/admin/promotions", get(list_records).post(create_record))
            .route("/api/v1/admin/promotions/{id}", put(update_record))
            .route("/api/v1/admin/devices", get(list_records).post(create_record))
            .route("/api/v1/admin/devices/{id}", put(update_record))
            .route("/api/v1/admin/hardware-kiosks", get(list_kiosks).post(create_kiosk))
            .route("/api/v1/admin/hardware-kiosks/{id}", put(update_kiosk))
            .route("/api/v1/admin/hardware-kiosks/{id}/assign", post(assign_kiosk))
            .route("/api/v1/admin/hardware-kiosks/{id}/unassign", post(unassign_kiosk))
            .route("/api/v1/admin/payments", get(list_payments))
            .route("/api/v1/admin/payments/summary", get(payment_summary))
            .route("/api/v1/admin/wash-sessions", get(list_sessions))
            .route("/api/v1/admin/wash-sessions/{id}/stop", post(stop_session))
            .route("/api/v1/files/upload", post(upload))
            .route("/api/v1/app-auth/otp/request", post(request_otp))
            .route("/api/v1/app-auth/otp/verify", post(verify_otp))
            .route("/api/v1/app/me", get(app_me))
            .route("/api/v1/app/user/profile", put(app_update_profile))
            .route("/api/v1/app/branches", get(app_branches))
            .route("/api/v1/app/promotions", get(app_catalogue))
            .route("/api/v1/app/services", get(app_catalogue))
            .route("/api/v1/app/qr/scan", get(app_scan_qr))
            .route("/api/v1/app/orders", get(app_orders))
            .route("/api/v1/app/wallet", get(app_wallet))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Register a token as valid for the root account
    pub async fn issue_token(&self, token: &str) {
        self.state
            .write()
            .await
            .tokens
            .insert(token.to_string(), profile(ROOT_EMAIL));
    }

    pub async fn revoke_all(&self) {
        self.state.write().await.tokens.clear();
    }

    /// Register a token for the partner account of `org-1`
    pub async fn issue_partner_token(&self, token: &str) {
        self.state
            .write()
            .await
            .tokens
            .insert(token.to_string(), profile(PARTNER_EMAIL));
    }

    pub async fn add_kiosk(&self, kiosk: Value) {
        self.state.write().await.kiosks.push(kiosk);
    }

    pub async fn add_branch(&self, branch: Value) {
        self.state.write().await.branches.push(branch);
    }

    /// Seed a generic collection such as `services` or `accounts`
    pub async fn add_record(&self, collection: &str, record: Value) {
        self.state
            .write()
            .await
            .records
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub async fn add_payment(&self, payment: Value) {
        self.state.write().await.payments.push(payment);
    }

    /// Write requests sent to `path`
    pub async fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.state
            .read()
            .await
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub async fn add_session(&self, id: &str, status: &str) {
        self.state.write().await.sessions.push(json!({
            "id": id,
            "kioskId": "AA:BB:CC:DD:EE:01",
            "status": status,
            "paidAmount": 10000,
            "startedAt": "2026-02-27T10:00:00Z",
        }));
    }

    pub async fn set_session_delay(&self, status: &str, delay: Duration) {
        self.state
            .write()
            .await
            .session_delay
            .insert(status.to_string(), delay);
    }

    pub async fn stop(self) {
        self.handle.abort();
    }
}

fn profile(email: &str) -> Value {
    if email == ROOT_EMAIL {
        json!({ "email": email, "fullName": "Root", "role": "SUPER_ADMIN", "orgId": "" })
    } else {
        json!({ "email": email, "fullName": "Partner", "role": "PARTNER_ADMIN", "orgId": "org-1" })
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn authorized(state: &SharedState, headers: &HeaderMap) -> Result<Value, Response> {
    let token = bearer(headers).ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())?;
    state
        .read()
        .await
        .tokens
        .get(&token)
        .cloned()
        .ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password != PASSWORD || (email != ROOT_EMAIL && email != PARTNER_EMAIL) {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let token = format!("jwt-{}", email);
    let profile = profile(email);
    state.write().await.tokens.insert(token.clone(), profile.clone());

    let mut resp = profile;
    resp["accessToken"] = json!(token);
    Json(resp).into_response()
}

async fn me(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    match authorized(&state, &headers).await {
        Ok(profile) => Json(profile).into_response(),
        Err(resp) => resp,
    }
}

async fn list_branches(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let branches: Vec<Value> = state
        .read()
        .await
        .branches
        .iter()
        .filter(|b| match params.get("orgId") {
            Some(org) => b["orgId"] == json!(org),
            None => true,
        })
        .cloned()
        .collect();
    Json(branches).into_response()
}

async fn create_branch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    if body["orgId"].as_str().unwrap_or_default().is_empty() {
        return error(StatusCode::BAD_REQUEST, "orgId is required");
    }
    let mut state = state.write().await;
    body["id"] = json!(format!("br-{}", state.branches.len() + 1));
    state.branches.push(body.clone());
    Json(body).into_response()
}

async fn delete_branch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    let before = state.branches.len();
    state.branches.retain(|b| b["id"] != json!(id));
    if state.branches.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Records whose `orgId`/`branchId`/`status` match the query
fn filtered(records: &[Value], params: &HashMap<String, String>) -> Vec<Value> {
    records
        .iter()
        .filter(|r| {
            ["orgId", "branchId", "status"]
                .iter()
                .all(|key| match params.get(*key) {
                    Some(value) => r[*key] == json!(value),
                    None => true,
                })
        })
        .cloned()
        .collect()
}

/// Collection name of an admin path, e.g. `services`
fn collection(uri: &Uri) -> String {
    uri.path()
        .trim_start_matches("/api/v1/admin/")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn merge(target: &mut Value, body: &Value) {
    if let (Some(target), Some(body)) = (target.as_object_mut(), body.as_object()) {
        for (key, value) in body {
            target.insert(key.clone(), value.clone());
        }
    }
}

async fn list_records(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let profile = match authorized(&state, &headers).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };
    let name = collection(&uri);
    if matches!(name.as_str(), "organizations" | "accounts") && profile["role"] != json!("SUPER_ADMIN")
    {
        return error(StatusCode::FORBIDDEN, "Access denied");
    }
    let state = state.read().await;
    let records = state.records.get(&name).cloned().unwrap_or_default();
    Json(filtered(&records, &params)).into_response()
}

async fn create_record(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let name = collection(&uri);
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    let records = state.records.entry(name.clone()).or_default();
    let mut record = body;
    record["id"] = json!(format!("{}-{}", name, records.len() + 1));
    if let Some(record) = record.as_object_mut() {
        record.remove("password");
    }
    records.push(record.clone());
    Json(record).into_response()
}

async fn update_record(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let name = collection(&uri);
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    let Some(record) = state
        .records
        .get_mut(&name)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == json!(id)))
    else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };
    merge(record, &body);
    if let Some(record) = record.as_object_mut() {
        record.remove("password");
    }
    Json(record.clone()).into_response()
}

async fn update_branch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    let Some(branch) = state.branches.iter_mut().find(|b| b["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    merge(branch, &body);
    Json(branch.clone()).into_response()
}

async fn list_kiosks(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    Json(filtered(&state.read().await.kiosks, &params)).into_response()
}

async fn create_kiosk(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    if state.kiosks.iter().any(|k| k["macId"] == body["macId"]) {
        return error(StatusCode::CONFLICT, "Kiosk with this MAC already exists");
    }
    let mut kiosk = body;
    kiosk["id"] = json!(format!("k{}", state.kiosks.len() + 1));
    kiosk["status"] = json!("REGISTERED");
    kiosk["cashBalance"] = json!(0);
    state.kiosks.push(kiosk.clone());
    Json(kiosk).into_response()
}

/// Assignment keeps the overrides as they are
async fn assign_kiosk(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    let Some(kiosk) = state.kiosks.iter_mut().find(|k| k["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    kiosk["orgId"] = body["orgId"].clone();
    kiosk["branchId"] = body.get("branchId").cloned().unwrap_or(Value::Null);
    kiosk["status"] = json!("ACTIVE");
    Json(kiosk.clone()).into_response()
}

async fn unassign_kiosk(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: Value::Null,
    });
    let Some(kiosk) = state.kiosks.iter_mut().find(|k| k["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    kiosk["orgId"] = Value::Null;
    kiosk["branchId"] = Value::Null;
    kiosk["status"] = json!("REGISTERED");
    Json(kiosk.clone()).into_response()
}

fn payment_matches(payment: &Value, params: &HashMap<String, String>) -> bool {
    let by = |param: &str, key: &str| match params.get(param) {
        Some(value) => payment[key] == json!(value),
        None => true,
    };
    by("type", "paymentType") && by("orgId", "orgId") && by("kioskId", "kioskId")
}

async fn list_payments(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state
        .payment_queries
        .push((uri.path().to_string(), uri.query().map(str::to_string)));
    let payments: Vec<Value> = state
        .payments
        .iter()
        .filter(|p| payment_matches(p, &params))
        .cloned()
        .collect();
    Json(payments).into_response()
}

async fn payment_summary(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state
        .payment_queries
        .push((uri.path().to_string(), uri.query().map(str::to_string)));

    let mut summary = json!({});
    for kind in ["CASH", "RFID", "ONLINE", "ALL"] {
        let matching: Vec<&Value> = state
            .payments
            .iter()
            .filter(|p| payment_matches(p, &params))
            .filter(|p| p["status"] == json!("SUCCESS"))
            .filter(|p| kind == "ALL" || p["paymentType"] == json!(kind))
            .collect();
        let total: i64 = matching.iter().filter_map(|p| p["amount"].as_i64()).sum();
        summary[kind] = json!({ "count": matching.len(), "total": total });
    }
    Json(summary).into_response()
}

async fn update_kiosk(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    state.last_kiosk_update = Some(body.clone());
    let Some(kiosk) = state.kiosks.iter_mut().find(|k| k["id"] == json!(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    for key in ["name", "status", "orgId", "branchId", "iotOverrides"] {
        if let Some(value) = body.get(key) {
            kiosk[key] = value.clone();
        }
    }
    Json(kiosk.clone()).into_response()
}

async fn list_sessions(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let status = params.get("status").cloned();
    let delay = {
        let mut state = state.write().await;
        state.session_queries.push(status.clone());
        if state.fail_sessions {
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Mongo timeout");
        }
        state
            .session_delay
            .get(status.as_deref().unwrap_or("ALL"))
            .copied()
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let sessions: Vec<Value> = state
        .read()
        .await
        .sessions
        .iter()
        .filter(|s| match &status {
            Some(status) => s["status"] == json!(status),
            None => true,
        })
        .cloned()
        .collect();
    Json(sessions).into_response()
}

async fn stop_session(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    let mut state = state.write().await;
    let Some(session) = state.sessions.iter_mut().find(|s| s["id"] == json!(id)) else {
        return error(StatusCode::BAD_REQUEST, "Session not found");
    };
    session["status"] = json!("FINISHED");
    session["finishReason"] = json!("ADMIN_STOP");
    Json(session.clone()).into_response()
}

async fn upload(State(state): State<SharedState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Err(resp) = authorized(&state, &headers).await {
        return resp;
    }
    state.write().await.uploads.push(body);
    Json(json!({ "url": "/uploads/logo.png" })).into_response()
}

async fn request_otp(Json(body): Json<Value>) -> Response {
    if body["phone"].as_str().unwrap_or_default().is_empty() {
        return error(StatusCode::BAD_REQUEST, "phone is required");
    }
    Json(json!({ "devOtp": DEV_OTP })).into_response()
}

async fn verify_otp(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if body["otp"] != json!(DEV_OTP) {
        return error(StatusCode::BAD_REQUEST, "Invalid OTP");
    }
    let token = format!("app-{}", body["phone"].as_str().unwrap_or_default());
    state.write().await.app_tokens.insert(token.clone());
    Json(json!({ "accessToken": token, "refreshToken": "refresh", "isNewUser": true }))
        .into_response()
}

async fn app_authorized(state: &SharedState, headers: &HeaderMap) -> Result<String, Response> {
    let token = bearer(headers).ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())?;
    if !state.read().await.app_tokens.contains(&token) {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    }
    Ok(token)
}

fn app_user(state: &MockState, token: &str) -> Value {
    state.app_users.get(token).cloned().unwrap_or_else(|| {
        json!({ "id": "u1", "phone": token.trim_start_matches("app-"), "fullName": null })
    })
}

async fn app_me(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    match app_authorized(&state, &headers).await {
        Ok(token) => Json(app_user(&*state.read().await, &token)).into_response(),
        Err(resp) => resp,
    }
}

async fn app_update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    let token = match app_authorized(&state, &headers).await {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let mut state = state.write().await;
    state.requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        body: body.clone(),
    });
    let mut user = app_user(&state, &token);
    merge(&mut user, &body);
    state.app_users.insert(token, user.clone());
    Json(user).into_response()
}

async fn app_branches(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = app_authorized(&state, &headers).await {
        return resp;
    }
    let state = state.read().await;
    if state.app_branches_not_array {
        return Json(json!({ "message": "maintenance" })).into_response();
    }
    Json(filtered(&state.branches, &params)).into_response()
}

/// Promotions or services of a branch; `macId` resolves the kiosk's branch
async fn app_catalogue(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Query(mut params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = app_authorized(&state, &headers).await {
        return resp;
    }
    let name = uri
        .path()
        .trim_start_matches("/api/v1/app/")
        .to_string();
    let state = state.read().await;
    if let Some(mac) = params.remove("macId") {
        let Some(kiosk) = state.kiosks.iter().find(|k| k["macId"] == json!(mac)) else {
            return error(StatusCode::NOT_FOUND, "Kiosk not found");
        };
        if let Some(branch) = kiosk["branchId"].as_str() {
            params.insert("branchId".to_string(), branch.to_string());
        }
    }
    let records = state.records.get(&name).cloned().unwrap_or_default();
    Json(filtered(&records, &params)).into_response()
}

async fn app_scan_qr(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = app_authorized(&state, &headers).await {
        return resp;
    }
    let code = params.get("code").cloned().unwrap_or_default();
    let state = state.read().await;
    let Some(kiosk) = state
        .kiosks
        .iter()
        .find(|k| k["macId"] == json!(code) || k["id"] == json!(code))
    else {
        return error(StatusCode::NOT_FOUND, "Kiosk not found");
    };
    Json(json!({
        "macId": kiosk["macId"],
        "branchId": kiosk["branchId"],
        "kioskId": kiosk["id"],
        "name": kiosk["name"],
    }))
    .into_response()
}

async fn app_orders(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Err(resp) = app_authorized(&state, &headers).await {
        return resp;
    }
    let state = state.read().await;
    let orders = state.records.get("orders").cloned().unwrap_or_default();
    Json(json!({ "content": orders, "totalElements": orders.len() })).into_response()
}

async fn app_wallet(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let token = match app_authorized(&state, &headers).await {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    Json(json!({ "walletId": format!("w-{}", token), "balance": 50000, "currency": "UZS" }))
        .into_response()
}
