use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::equipment::MAINTENANCE_WINDOW_MS;
use crate::models::{Equipment, SystemConfig, User, UserRole};
use crate::services::analytics::{self, DashboardSummary, DateRange, ReportData, ReportKind, SystemStats};
use crate::state::{AppState, ChangedCollection};

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let summary = {
        let db = state.db.lock().unwrap();
        analytics::dashboard_summary(&db, Utc::now())?
    };
    Ok(Json(summary))
}

// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SystemStats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stats = {
        let db = state.db.lock().unwrap();
        analytics::system_stats(&db, Utc::now())?
    };
    Ok(Json(stats))
}

// GET /api/admin/reports
#[derive(Deserialize)]
pub struct ReportQuery {
    pub kind: String,
    pub range: Option<String>,
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportData>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let kind = ReportKind::parse(&query.kind)
        .ok_or_else(|| AppError::Validation(format!("unknown report kind: {}", query.kind)))?;
    let range = match query.range.as_deref() {
        Some(r) => DateRange::parse(r)
            .ok_or_else(|| AppError::Validation(format!("unknown date range: {r}")))?,
        None => DateRange::Last30Days,
    };

    let data = {
        let db = state.db.lock().unwrap();
        analytics::report(&db, kind, range, Utc::now())?
    };
    Ok(Json(data))
}

// GET /api/admin/config
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SystemConfig>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let config = {
        let db = state.db.lock().unwrap();
        queries::get_system_config(&db)?
    };
    Ok(Json(config.unwrap_or_default()))
}

// PUT /api/admin/config — whole-document replace
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(config): Json<SystemConfig>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    {
        let db = state.db.lock().unwrap();
        queries::save_system_config(&db, &config)?;
    }
    tracing::info!("system configuration saved");
    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/admin/users
#[derive(Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let users = {
        let db = state.db.lock().unwrap();
        queries::get_users(&db, query.search.as_deref())?
    };
    Ok(Json(users))
}

// GET /api/admin/clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let clients = {
        let db = state.db.lock().unwrap();
        queries::get_clients(&db, query.search.as_deref())?
    };
    Ok(Json(clients))
}

// POST /api/admin/users/:id/role
#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_user_role(&db, &id, body.role)?
    };

    if updated {
        tracing::info!(user_id = %id, role = body.role.as_str(), "user role updated");
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound("user not found".to_string()))
    }
}

// POST /api/admin/users/:id/status
#[derive(Deserialize)]
pub struct UpdateActiveRequest {
    pub is_active: bool,
}

pub async fn update_user_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateActiveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_user_active(&db, &id, body.is_active)?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound("user not found".to_string()))
    }
}

// GET /api/admin/equipment/maintenance — items due for service within the
// warning window
pub async fn maintenance_due(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Equipment>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let items = {
        let db = state.db.lock().unwrap();
        queries::get_maintenance_due(&db, crate::now_ms() + MAINTENANCE_WINDOW_MS)?
    };
    Ok(Json(items))
}

// POST /api/admin/equipment/:id/availability
#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
}

pub async fn set_equipment_availability(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateAvailabilityRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::set_equipment_availability(&db, &id, body.is_available)?
    };

    if updated {
        let _ = state.changes_tx.send(ChangedCollection::Equipment);
        tracing::info!(equipment_id = %id, is_available = body.is_available, "equipment availability updated");
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound("equipment not found".to_string()))
    }
}
