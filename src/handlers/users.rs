use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Dashboard, User, UserRole, UserSettings};
use crate::state::AppState;

// POST /api/users
//
// The identity provider owns credentials; this endpoint only mirrors the
// resulting principal into the users collection. When no external id is
// supplied one is generated.
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub id: Option<String>,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: Option<UserRole>,
}

pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<Json<User>, AppError> {
    let email = body.email.trim().to_string();
    let full_name = body.full_name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }
    if full_name.is_empty() {
        return Err(AppError::Validation("full_name is required".to_string()));
    }

    let db = state.db.lock().unwrap();

    let config = queries::get_system_config(&db)?.unwrap_or_default();
    if !config.allow_new_registrations {
        return Err(AppError::Validation(
            "new registrations are currently disabled".to_string(),
        ));
    }

    let id = body
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    if queries::get_user(&db, &id)?.is_some() {
        return Err(AppError::Conflict("user already exists".to_string()));
    }
    if queries::email_exists(&db, &email)? {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let user = User {
        id,
        email,
        full_name,
        phone: body.phone.trim().to_string(),
        role: body.role.unwrap_or(UserRole::Client),
        created_at: crate::now_ms(),
        is_active: true,
        total_bookings: 0,
        total_spent: 0.0,
        last_booking_date: 0,
        average_rating: 0.0,
    };
    queries::insert_user(&db, &user)?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");
    Ok(Json(user))
}

// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = {
        let db = state.db.lock().unwrap();
        queries::get_user(&db, &id)?
    };

    user.map(Json)
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

// GET /api/users/:id/dashboard — the role-keyed dispatch: which dashboard
// this principal lands on and which actions it is offered.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub role: UserRole,
    pub dashboard: Dashboard,
    pub actions: &'static [&'static str],
}

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = {
        let db = state.db.lock().unwrap();
        queries::get_user(&db, &id)?
    }
    .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(DashboardResponse {
        role: user.role,
        dashboard: user.role.dashboard(),
        actions: user.role.allowed_actions(),
    }))
}

// GET /api/users/:id/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserSettings>, AppError> {
    let settings = {
        let db = state.db.lock().unwrap();
        queries::get_user_settings(&db, &id)?
    };

    Ok(Json(settings.unwrap_or_default()))
}

// PUT /api/users/:id/settings — whole-document replace, matching the
// store's last-writer-wins semantics.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(settings): Json<UserSettings>,
) -> Result<Json<serde_json::Value>, AppError> {
    {
        let db = state.db.lock().unwrap();
        queries::save_user_settings(&db, &id, &settings)?;
    }
    Ok(Json(serde_json::json!({"ok": true})))
}
