//! Handlers for the `/trees` resource.
//!
//! Reads are available to every authenticated user, filtered through the
//! access-tiering predicate; mutation is admin-only and validates the node
//! graph on save.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use clinidex_core::access::{tree_access, TreeAccess};
use clinidex_core::error::CoreError;
use clinidex_core::settings::{parse_tree_id, SETTING_FREEMIUM_TREE_ID};
use clinidex_core::tree::{validate_nodes, Node};
use clinidex_core::types::DbId;
use clinidex_db::models::tree::{
    CreateTree, TreeResponse, TreeSummaryResponse, UpdateTree,
};
use clinidex_db::repositories::{SettingRepo, TreeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/trees` and `PUT /admin/trees/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveTreeRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

fn default_icon() -> String {
    "🦴".to_string()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/trees
///
/// List every tree with a `locked` flag computed from the requester's tier.
/// Locked trees stay visible; only opening them is denied.
pub async fn list_trees(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<TreeSummaryResponse>>> {
    let freemium_tree_id = freemium_tree_id(&state).await?;
    let summaries = TreeRepo::list_summaries(&state.pool).await?;

    let response = summaries
        .into_iter()
        .map(|s| {
            let locked = tree_access(&user.role, s.id, freemium_tree_id).is_locked();
            TreeSummaryResponse {
                id: s.id,
                name: s.name,
                icon: s.icon,
                created_at: s.created_at,
                updated_at: s.updated_at,
                locked,
            }
        })
        .collect();

    Ok(Json(response))
}

/// GET /api/v1/trees/{id}
///
/// Full tree (node graph included). Opening a tree outside the requester's
/// tier is a 403 with a generic message.
pub async fn get_tree(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<TreeResponse>> {
    let tree = TreeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tree", id)))?;

    let freemium_tree_id = freemium_tree_id(&state).await?;
    if tree_access(&user.role, tree.id, freemium_tree_id) == TreeAccess::Locked {
        return Err(AppError::Core(CoreError::Forbidden(
            "This tree is not available on your plan".into(),
        )));
    }

    Ok(Json(tree.to_response()))
}

/// POST /api/v1/admin/trees
///
/// Create a tree. The node graph is validated before it is stored: dangling
/// or unassigned answer targets are rejected here, not at traversal time.
pub async fn create_tree(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<SaveTreeRequest>,
) -> AppResult<(StatusCode, Json<TreeResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_nodes(&input.nodes)?;

    let create = CreateTree {
        name: input.name,
        icon: input.icon,
        nodes: input.nodes,
    };
    let tree = TreeRepo::create(&state.pool, &create, admin.user_id).await?;
    Ok((StatusCode::CREATED, Json(tree.to_response())))
}

/// PUT /api/v1/admin/trees/{id}
///
/// Replace a tree's name, icon, and node graph. Same validation as create.
pub async fn update_tree(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SaveTreeRequest>,
) -> AppResult<Json<TreeResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_nodes(&input.nodes)?;

    let update = UpdateTree {
        name: input.name,
        icon: input.icon,
        nodes: input.nodes,
    };
    let tree = TreeRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tree", id)))?;
    Ok(Json(tree.to_response()))
}

/// DELETE /api/v1/admin/trees/{id}
///
/// Delete a tree. Historical diagnostic sessions keep their denormalized
/// copy. Returns 204 No Content.
pub async fn delete_tree(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TreeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Tree", id)))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the freemium tree id from the live setting value.
///
/// Reading it per-request is what makes a settings change take effect
/// immediately for freemium users.
async fn freemium_tree_id(state: &AppState) -> AppResult<Option<DbId>> {
    let value = SettingRepo::value(&state.pool, SETTING_FREEMIUM_TREE_ID).await?;
    Ok(value.as_deref().and_then(parse_tree_id))
}
