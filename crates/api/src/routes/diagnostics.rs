//! Route definitions for the `/diagnostics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::diagnostics;
use crate::state::AppState;

/// Routes mounted at `/diagnostics` (owner-scoped, requires auth).
///
/// ```text
/// GET  /              -> list_diagnostics (own history)
/// POST /              -> create_diagnostic
/// GET  /{id}          -> get_diagnostic
/// GET  /{id}/report   -> download_report (PDF)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(diagnostics::list_diagnostics).post(diagnostics::create_diagnostic),
        )
        .route("/{id}", get(diagnostics::get_diagnostic))
        .route("/{id}/report", get(diagnostics::download_report))
}
