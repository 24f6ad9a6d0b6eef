//! Repository for the `reference_tests` table.

use sqlx::PgPool;

use clinidex_core::types::DbId;

use crate::models::reference_test::{CreateReferenceTest, ReferenceTest, UpdateReferenceTest};

const COLUMNS: &str = "id, region, name, description, sensitivity, specificity, lr_plus, \
                        lr_minus, video_url, references_text, interpretation, created_by, \
                        created_at, updated_at";

/// Provides CRUD operations for the reference-test catalog.
pub struct ReferenceTestRepo;

impl ReferenceTestRepo {
    /// Insert a new reference test, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReferenceTest,
        created_by: DbId,
    ) -> Result<ReferenceTest, sqlx::Error> {
        let query = format!(
            "INSERT INTO reference_tests
                (region, name, description, sensitivity, specificity, lr_plus, lr_minus,
                 video_url, references_text, interpretation, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReferenceTest>(&query)
            .bind(&input.region)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sensitivity)
            .bind(input.specificity)
            .bind(input.lr_plus)
            .bind(input.lr_minus)
            .bind(&input.video_url)
            .bind(&input.references_text)
            .bind(&input.interpretation)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a reference test by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ReferenceTest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reference_tests WHERE id = $1");
        sqlx::query_as::<_, ReferenceTest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reference tests, optionally filtered by body region,
    /// ordered by region then name.
    pub async fn list(
        pool: &PgPool,
        region: Option<&str>,
    ) -> Result<Vec<ReferenceTest>, sqlx::Error> {
        match region {
            Some(region) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reference_tests WHERE region = $1 ORDER BY region, name"
                );
                sqlx::query_as::<_, ReferenceTest>(&query)
                    .bind(region)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM reference_tests ORDER BY region, name");
                sqlx::query_as::<_, ReferenceTest>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update a reference test. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Note: editing the
    /// catalog never rewrites the snapshots embedded in tree test-nodes.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReferenceTest,
    ) -> Result<Option<ReferenceTest>, sqlx::Error> {
        let query = format!(
            "UPDATE reference_tests SET
                region = COALESCE($2, region),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                sensitivity = COALESCE($5, sensitivity),
                specificity = COALESCE($6, specificity),
                lr_plus = COALESCE($7, lr_plus),
                lr_minus = COALESCE($8, lr_minus),
                video_url = COALESCE($9, video_url),
                references_text = COALESCE($10, references_text),
                interpretation = COALESCE($11, interpretation),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReferenceTest>(&query)
            .bind(id)
            .bind(&input.region)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sensitivity)
            .bind(input.specificity)
            .bind(input.lr_plus)
            .bind(input.lr_minus)
            .bind(&input.video_url)
            .bind(&input.references_text)
            .bind(&input.interpretation)
            .fetch_optional(pool)
            .await
    }

    /// Delete a reference test. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reference_tests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
