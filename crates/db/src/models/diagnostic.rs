//! Diagnostic session model.
//!
//! One row per completed traversal, written once and never updated. Tree
//! name, result fields, and the visited path are denormalized copies so the
//! record survives later edits or deletion of the source tree.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use clinidex_core::tree::NodeId;
use clinidex_core::types::{DbId, Timestamp};

/// A persisted diagnostic session row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiagnosticSession {
    pub id: DbId,
    pub user_id: DbId,
    /// NULL once the source tree has been deleted.
    pub tree_id: Option<DbId>,
    pub tree_name: String,
    pub path: Json<Vec<NodeId>>,
    pub result_title: String,
    pub result_severity: String,
    pub result_description: String,
    pub recommendations: Json<Vec<String>>,
    pub created_at: Timestamp,
}

/// DTO for persisting a completed traversal.
#[derive(Debug)]
pub struct CreateDiagnostic {
    pub user_id: DbId,
    pub tree_id: DbId,
    pub tree_name: String,
    pub path: Vec<NodeId>,
    pub result_title: String,
    pub result_severity: String,
    pub result_description: String,
    pub recommendations: Vec<String>,
}
