//! Decision-tree entity model and DTOs.
//!
//! The node graph is stored as a JSONB array in the `data` column and
//! surfaces through the API as `nodes`, preserving the
//! `{ id, name, icon, nodes: [...] }` read shape.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use clinidex_core::tree::Node;
use clinidex_core::types::{DbId, Timestamp};

/// Full tree row including the embedded node graph.
#[derive(Debug, Clone, FromRow)]
pub struct Tree {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub data: Json<Vec<Node>>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tree {
    pub fn to_response(&self) -> TreeResponse {
        TreeResponse {
            id: self.id,
            name: self.name.clone(),
            icon: self.icon.clone(),
            nodes: self.data.0.clone(),
        }
    }
}

/// Tree row without the node graph, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TreeSummary {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full tree read shape: `{ id, name, icon, nodes }`.
#[derive(Debug, Clone, Serialize)]
pub struct TreeResponse {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub nodes: Vec<Node>,
}

/// Listing entry: summary fields plus the access-tier lock flag.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummaryResponse {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// `true` when the requesting user's tier may not open this tree.
    pub locked: bool,
}

/// DTO for creating a tree. The node graph must already be validated.
#[derive(Debug)]
pub struct CreateTree {
    pub name: String,
    pub icon: String,
    pub nodes: Vec<Node>,
}

/// DTO for updating a tree. The node graph is replaced wholesale; admin
/// edits always submit the entire graph.
#[derive(Debug)]
pub struct UpdateTree {
    pub name: String,
    pub icon: String,
    pub nodes: Vec<Node>,
}
