//! Global setting model.

use serde::Serialize;
use sqlx::FromRow;

use clinidex_core::types::Timestamp;

/// One key/value row from the `settings` table. Values are always strings;
/// numeric and boolean settings are encoded as strings by convention.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
