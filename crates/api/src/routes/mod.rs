//! Route tree assembly.

pub mod admin;
pub mod auth;
pub mod diagnostics;
pub mod health;
pub mod reference_tests;
pub mod settings;
pub mod trees;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current profile (requires auth)
/// /auth/password                     change own password (requires auth)
///
/// /trees                             list with locked flags (requires auth)
/// /trees/{id}                        full tree, 403 when locked
///
/// /tests                             list (?region=) (requires auth)
/// /tests/{id}                        get
///
/// /diagnostics                       create, list own history
/// /diagnostics/{id}                  get (owner only)
/// /diagnostics/{id}/report           PDF download (owner only)
///
/// /settings/{key}                    get (requires auth)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get, update, deactivate
/// /admin/stats                       usage statistics
/// /admin/trees                       create (admin only)
/// /admin/trees/{id}                  update, delete
/// /admin/tests                       create (admin only)
/// /admin/tests/{id}                  update, delete
/// /admin/settings/{key}              upsert (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Admin routes (user management + statistics).
        .nest("/admin", admin::router())
        .nest("/admin/trees", trees::admin_router())
        .nest("/admin/tests", reference_tests::admin_router())
        .nest("/admin/settings", settings::admin_router())
        // Authenticated user routes.
        .nest("/trees", trees::router())
        .nest("/tests", reference_tests::router())
        .nest("/diagnostics", diagnostics::router())
        .nest("/settings", settings::router())
}
