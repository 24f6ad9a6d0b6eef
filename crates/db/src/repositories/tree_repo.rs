//! Repository for the `trees` table.

use sqlx::types::Json;
use sqlx::PgPool;

use clinidex_core::types::DbId;

use crate::models::tree::{CreateTree, Tree, TreeSummary, UpdateTree};

const COLUMNS: &str = "id, name, icon, data, created_by, created_at, updated_at";

/// Provides CRUD operations for decision trees.
pub struct TreeRepo;

impl TreeRepo {
    /// Insert a new tree, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTree,
        created_by: DbId,
    ) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "INSERT INTO trees (name, icon, data, created_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(Json(&input.nodes))
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a tree (with its node graph) by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE id = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tree summaries (no node graphs) ordered by name.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<TreeSummary>, sqlx::Error> {
        sqlx::query_as::<_, TreeSummary>(
            "SELECT id, name, icon, created_at, updated_at FROM trees ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace a tree's name, icon, and node graph.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTree,
    ) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!(
            "UPDATE trees SET name = $2, icon = $3, data = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(Json(&input.nodes))
            .fetch_optional(pool)
            .await
    }

    /// Delete a tree. Historical diagnostics keep their denormalized copy;
    /// their `tree_id` is set to NULL by the foreign key.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
