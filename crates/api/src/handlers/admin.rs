//! Handlers for the `/admin` resource (user management and statistics).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use clinidex_core::error::CoreError;
use clinidex_core::roles::is_valid_role;
use clinidex_core::types::DbId;
use clinidex_db::models::user::{CreateUser, UpdateUser, UserResponse};
use clinidex_db::repositories::{RoleCount, StatsRepo, TreeUsageCount, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on admin-created accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Response body for `GET /admin/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_trees: i64,
    pub total_tests: i64,
    pub total_diagnostics: i64,
    pub users_by_role: Vec<RoleCount>,
    pub diagnostics_by_tree: Vec<TreeUsageCount>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user with an explicit role. Returns 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    ensure_valid_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: input.email,
        password_hash: hashed,
        name: input.name,
        role: input.role,
    };

    let user = UserRepo::create(&state.pool, &create).await?;
    Ok((StatusCode::CREATED, Json(user.to_response())))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.iter().map(|u| u.to_response()).collect()))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(user.to_response()))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's profile fields (not password).
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role) = &input.role {
        ensure_valid_role(role)?;
    }

    let update = UpdateUser {
        email: input.email,
        name: input.name,
        role: input.role,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(user.to_response()))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user (sets `is_active = false`). Admins cannot
/// deactivate their own account. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("User", id)))
    }
}

/// GET /api/v1/admin/stats
///
/// Usage statistics for the admin dashboard.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<StatsResponse>> {
    let response = StatsResponse {
        total_users: StatsRepo::total_active_users(&state.pool).await?,
        total_trees: StatsRepo::total_trees(&state.pool).await?,
        total_tests: StatsRepo::total_reference_tests(&state.pool).await?,
        total_diagnostics: StatsRepo::total_diagnostics(&state.pool).await?,
        users_by_role: StatsRepo::users_by_role(&state.pool).await?,
        diagnostics_by_tree: StatsRepo::diagnostics_by_tree(&state.pool).await?,
    };
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_valid_role(role: &str) -> AppResult<()> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "unknown role '{role}' (expected admin, premium, or freemium)"
        ))))
    }
}
