//! Reference-test entity model and DTOs.
//!
//! Reference tests are the canonical orthopedic test catalog (distinct from
//! the snapshots embedded in tree test-nodes). Statistics are nullable: not
//! every test has published sensitivity/specificity figures.

use serde::Serialize;
use sqlx::FromRow;

use clinidex_core::types::{DbId, Timestamp};

/// Full reference-test row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferenceTest {
    pub id: DbId,
    pub region: String,
    pub name: String,
    pub description: Option<String>,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub lr_plus: Option<f64>,
    pub lr_minus: Option<f64>,
    pub video_url: Option<String>,
    pub references_text: Option<String>,
    pub interpretation: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a reference test.
#[derive(Debug)]
pub struct CreateReferenceTest {
    pub region: String,
    pub name: String,
    pub description: Option<String>,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub lr_plus: Option<f64>,
    pub lr_minus: Option<f64>,
    pub video_url: Option<String>,
    pub references_text: Option<String>,
    pub interpretation: Option<String>,
}

/// DTO for updating a reference test. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateReferenceTest {
    pub region: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub lr_plus: Option<f64>,
    pub lr_minus: Option<f64>,
    pub video_url: Option<String>,
    pub references_text: Option<String>,
    pub interpretation: Option<String>,
}
