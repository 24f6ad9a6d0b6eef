//! Route definitions for the `/trees` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::trees;
use crate::state::AppState;

/// Read routes mounted at `/trees` (any authenticated user).
///
/// ```text
/// GET /       -> list_trees (locked flags per the requester's tier)
/// GET /{id}   -> get_tree (403 when locked)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trees::list_trees))
        .route("/{id}", get(trees::get_tree))
}

/// Mutation routes mounted at `/admin/trees` (admin only).
///
/// ```text
/// POST   /       -> create_tree
/// PUT    /{id}   -> update_tree
/// DELETE /{id}   -> delete_tree
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(trees::create_tree))
        .route("/{id}", put(trees::update_tree).delete(trees::delete_tree))
}
