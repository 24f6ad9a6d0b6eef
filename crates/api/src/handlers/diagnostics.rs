//! Handlers for the `/diagnostics` resource.
//!
//! A diagnostic session is the persisted record of one completed traversal:
//! created exactly once, immutable, owner-scoped. The submitted path is
//! replayed through the traversal engine against the stored tree before
//! anything is written.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use clinidex_core::error::CoreError;
use clinidex_core::report::{render_pdf, ReportInput};
use clinidex_core::traversal::Traversal;
use clinidex_core::tree::{Node, NodeId, Severity};
use clinidex_core::types::DbId;
use clinidex_db::models::diagnostic::{CreateDiagnostic, DiagnosticSession};
use clinidex_db::repositories::{DiagnosticRepo, TreeRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /diagnostics`.
///
/// Result fields are the denormalized copy of the terminal node as rendered
/// to the user; they are checked against the replayed terminal node before
/// being stored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDiagnosticRequest {
    pub tree_id: DbId,
    #[validate(length(min = 1, message = "tree_name is required"))]
    pub tree_name: String,
    pub path: Vec<NodeId>,
    #[validate(length(min = 1, message = "result_title is required"))]
    pub result_title: String,
    pub result_severity: Severity,
    #[serde(default)]
    pub result_description: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/diagnostics
///
/// Persist a completed traversal. The path must be walkable through the
/// stored tree and terminate at a result node matching the submitted title
/// and severity. Returns 201 with the created record.
pub async fn create_diagnostic(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateDiagnosticRequest>,
) -> AppResult<(StatusCode, Json<DiagnosticSession>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let tree = TreeRepo::find_by_id(&state.pool, input.tree_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tree", input.tree_id)))?;

    let terminal = Traversal::replay(&tree.data.0, &input.path)?;
    match terminal {
        Node::Result {
            title, severity, ..
        } => {
            if *title != input.result_title || *severity != input.result_severity {
                return Err(AppError::Core(CoreError::Validation(
                    "submitted result fields do not match the terminal node".into(),
                )));
            }
        }
        // Traversal::replay guarantees a result node.
        _ => unreachable!("replay returned a non-result terminal"),
    }

    let create = CreateDiagnostic {
        user_id: user.user_id,
        tree_id: input.tree_id,
        tree_name: input.tree_name,
        path: input.path,
        result_title: input.result_title,
        result_severity: input.result_severity.as_str().to_string(),
        result_description: input.result_description,
        recommendations: input.recommendations,
    };
    let diagnostic = DiagnosticRepo::create(&state.pool, &create).await?;

    Ok((StatusCode::CREATED, Json(diagnostic)))
}

/// GET /api/v1/diagnostics
///
/// The authenticated user's history, most recent first (capped at 50).
pub async fn list_diagnostics(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<DiagnosticSession>>> {
    let diagnostics = DiagnosticRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(diagnostics))
}

/// GET /api/v1/diagnostics/{id}
///
/// One diagnostic, owner-scoped: another user's id yields a 404, never a
/// hint that the record exists.
pub async fn get_diagnostic(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DiagnosticSession>> {
    let diagnostic = DiagnosticRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Diagnostic", id)))?;
    Ok(Json(diagnostic))
}

/// GET /api/v1/diagnostics/{id}/report
///
/// The PDF report for one of the requester's own diagnostics, served as a
/// download named `diagnostic-{id}.pdf`.
pub async fn download_report(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let diagnostic = DiagnosticRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Diagnostic", id)))?;

    let practitioner = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user.user_id)))?;

    let severity = Severity::parse(&diagnostic.result_severity)
        .map_err(|e| AppError::InternalError(format!("stored severity is invalid: {e}")))?;

    let report = ReportInput {
        diagnostic_id: diagnostic.id,
        practitioner_name: &practitioner.name,
        tree_name: &diagnostic.tree_name,
        created_at: diagnostic.created_at,
        result_title: &diagnostic.result_title,
        severity,
        result_description: &diagnostic.result_description,
        recommendations: &diagnostic.recommendations.0,
    };
    let bytes = render_pdf(&report)?;

    let headers = AppendHeaders([
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=diagnostic-{}.pdf", diagnostic.id),
        ),
    ]);
    Ok((headers, bytes))
}
