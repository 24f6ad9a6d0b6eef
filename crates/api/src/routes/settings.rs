//! Route definitions for the `/settings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Read routes mounted at `/settings` (any authenticated user).
///
/// ```text
/// GET /{key}  -> get_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(settings::get_setting))
}

/// Write routes mounted at `/admin/settings` (admin only).
///
/// ```text
/// PUT /{key}  -> put_setting (upsert, last write wins)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/{key}", put(settings::put_setting))
}
