//! Repository for the `diagnostic_sessions` table.
//!
//! Rows are written once per completed traversal and never updated.

use sqlx::types::Json;
use sqlx::PgPool;

use clinidex_core::types::DbId;

use crate::models::diagnostic::{CreateDiagnostic, DiagnosticSession};

const COLUMNS: &str = "id, user_id, tree_id, tree_name, path, result_title, result_severity, \
                        result_description, recommendations, created_at";

/// How many history entries a user sees at most.
const HISTORY_LIMIT: i64 = 50;

/// Provides persistence for completed diagnostic sessions.
pub struct DiagnosticRepo;

impl DiagnosticRepo {
    /// Insert a completed diagnostic, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDiagnostic,
    ) -> Result<DiagnosticSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO diagnostic_sessions
                (user_id, tree_id, tree_name, path, result_title, result_severity,
                 result_description, recommendations)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiagnosticSession>(&query)
            .bind(input.user_id)
            .bind(input.tree_id)
            .bind(&input.tree_name)
            .bind(Json(&input.path))
            .bind(&input.result_title)
            .bind(&input.result_severity)
            .bind(&input.result_description)
            .bind(Json(&input.recommendations))
            .fetch_one(pool)
            .await
    }

    /// Find a diagnostic belonging to a given user.
    ///
    /// The query is scoped to the owner: another user's id yields `None`, so
    /// callers cannot distinguish "absent" from "not yours".
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DiagnosticSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagnostic_sessions WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, DiagnosticSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's diagnostics, most recent first, capped at 50.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DiagnosticSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagnostic_sessions
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, DiagnosticSession>(&query)
            .bind(user_id)
            .bind(HISTORY_LIMIT)
            .fetch_all(pool)
            .await
    }
}
