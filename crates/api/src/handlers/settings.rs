//! Handlers for the `/settings` resource.
//!
//! Global string key/value pairs. Reads are available to any authenticated
//! user; writes are admin-only upserts with last-write-wins semantics.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use clinidex_core::error::CoreError;
use clinidex_db::models::setting::Setting;
use clinidex_db::repositories::SettingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Request body for `PUT /admin/settings/{key}`. Values are always strings.
#[derive(Debug, Deserialize)]
pub struct PutSettingRequest {
    pub value: String,
}

/// GET /api/v1/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(key): Path<String>,
) -> AppResult<Json<Setting>> {
    let setting = SettingRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Setting", key)))?;
    Ok(Json(setting))
}

/// PUT /api/v1/admin/settings/{key}
///
/// Insert or replace a setting. Concurrent admin writes race; the last one
/// wins, by design.
pub async fn put_setting(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(key): Path<String>,
    Json(input): Json<PutSettingRequest>,
) -> AppResult<Json<Setting>> {
    let setting = SettingRepo::upsert(&state.pool, &key, &input.value).await?;
    Ok(Json(setting))
}
