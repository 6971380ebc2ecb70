//! Axum route handlers for the employee roster server.
//!
//! # Routes
//!
//! - `GET    /health`          — Returns `{"status": "ok", "version": ..., "service": ...}`
//! - `GET    /welcome`         — Greeting
//! - `GET    /employees`       — List all employees
//! - `GET    /employees/:n`    — Employee at position `n` (1-based)
//! - `POST   /employees`       — Append an employee
//! - `PUT    /employees/:n`    — Insert an employee in front of position `n`
//! - `DELETE /employees/:n`    — Remove the employee at position `n`
//! - `POST   /changes`         — Summarize a change-feed batch

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::changes::{summarize, ChangeSummary, EmployeeChange};
use crate::config::ServiceConfig;
use crate::employees::{Employee, EmployeeStore, StoreError};

type ApiError = (StatusCode, Json<Value>);

/// Shared application state for the HTTP server.
///
/// The store sits behind a single lock: positions shift on every insert and
/// delete, so mutations must never interleave.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<EmployeeStore>>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// State for `config`, with the store it describes.
    pub fn new(config: ServiceConfig) -> Self {
        let store = config.build_store();
        Self::with_store(store, config)
    }

    pub fn with_store(store: EmployeeStore, config: ServiceConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }

    fn read_store(&self) -> Result<RwLockReadGuard<'_, EmployeeStore>, ApiError> {
        self.store.read().map_err(|_| lock_poisoned())
    }

    fn write_store(&self) -> Result<RwLockWriteGuard<'_, EmployeeStore>, ApiError> {
        self.store.write().map_err(|_| lock_poisoned())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/welcome", get(welcome_handler))
        .route("/employees", get(list_employees_handler).post(create_employee_handler))
        .route(
            "/employees/:position",
            get(get_employee_handler)
                .put(replace_employee_handler)
                .delete(delete_employee_handler),
        )
        .route("/changes", post(changes_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn lock_poisoned() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Employee store lock poisoned"})),
    )
}

fn store_error(err: StoreError) -> ApiError {
    let status = match &err {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Conflict { .. } => StatusCode::CONFLICT,
        StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(status = status.as_u16(), "{}", err);
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let message = rejection.body_text();
    tracing::warn!(status = status.as_u16(), "{}", message);
    (status, Json(serde_json::json!({"error": message})))
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "employee-roster",
    }))
}

/// GET /welcome — greeting.
async fn welcome_handler() -> impl IntoResponse {
    tracing::info!(
        "welcome request processed at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Json("Welcome to the employee roster service!")
}

/// GET /employees — every employee in position order.
async fn list_employees_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let store = state.read_store()?;
    tracing::info!(count = store.len(), "Getting all employees...");
    Ok(Json(store.list().to_vec()))
}

/// GET /employees/:n
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(position): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    let store = state.read_store()?;
    let employee = store.get(position).map_err(store_error)?;
    tracing::info!(position, "Getting employee...");
    Ok(Json(employee.clone()))
}

/// POST /employees
///
/// Request body: `{ "name": "...", "occupation": "..." }`
async fn create_employee_handler(
    State(state): State<AppState>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(json_rejection)?;
    let created = state
        .write_store()?
        .create(&body.name, &body.occupation)
        .map_err(store_error)?;
    tracing::info!(
        position = created.position,
        "Employee: {} has been added to the list!",
        created.employee.name
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/employees/{}", created.position))],
        Json(created.employee),
    ))
}

/// PUT /employees/:n
///
/// Inserts the new record in front of position `n`; the previous occupant
/// moves to `n + 1`.
async fn replace_employee_handler(
    State(state): State<AppState>,
    Path(position): Path<i64>,
    body: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(json_rejection)?;
    let replaced = state
        .write_store()?
        .replace(position, &body.name, &body.occupation)
        .map_err(store_error)?;
    tracing::info!(position, "{}", replaced.message);

    Ok(Json(serde_json::json!({
        "message": replaced.message,
        "employee": replaced.employee,
    })))
}

/// DELETE /employees/:n
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(position): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.write_store()?.delete(position).map_err(store_error)?;
    let message = deleted.message();
    tracing::info!(position, "{}", message);

    Ok(Json(serde_json::json!({
        "message": message,
        "remaining": deleted.remaining,
    })))
}

/// POST /changes — summarize a change-feed batch.
///
/// Request body: `[{ "operation": "Insert" | "Update" | "Delete", "item": Employee }]`
async fn changes_handler(
    State(state): State<AppState>,
    changes: Result<Json<Vec<EmployeeChange>>, JsonRejection>,
) -> Result<Json<ChangeSummary>, ApiError> {
    let Json(changes) = changes.map_err(json_rejection)?;
    tracing::info!("There have been {} changes in the database!", changes.len());

    let delay = state.config.change_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let summary = summarize(&changes);
    for line in summary.lines() {
        tracing::info!("{}", line);
    }
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
