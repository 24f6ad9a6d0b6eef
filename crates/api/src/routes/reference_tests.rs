//! Route definitions for the `/tests` resource (reference-test catalog).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::reference_tests;
use crate::state::AppState;

/// Read routes mounted at `/tests` (any authenticated user).
///
/// ```text
/// GET /       -> list_tests (?region= filter)
/// GET /{id}   -> get_test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reference_tests::list_tests))
        .route("/{id}", get(reference_tests::get_test))
}

/// Mutation routes mounted at `/admin/tests` (admin only).
///
/// ```text
/// POST   /       -> create_test
/// PUT    /{id}   -> update_test
/// DELETE /{id}   -> delete_test
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(reference_tests::create_test))
        .route(
            "/{id}",
            put(reference_tests::update_test).delete(reference_tests::delete_test),
        )
}
