//! Aggregate statistics for the admin dashboard.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Active user count per role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// Diagnostic count per tree name (denormalized, so deleted trees count too).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TreeUsageCount {
    pub tree_name: String,
    pub count: i64,
}

/// Read-only aggregate queries across tables.
pub struct StatsRepo;

impl StatsRepo {
    pub async fn total_active_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active = true")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    pub async fn total_trees(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trees")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    pub async fn total_reference_tests(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reference_tests")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    pub async fn total_diagnostics(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diagnostic_sessions")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Active users grouped by role.
    pub async fn users_by_role(pool: &PgPool) -> Result<Vec<RoleCount>, sqlx::Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count
             FROM users
             WHERE is_active = true
             GROUP BY role
             ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }

    /// The ten most-used trees by diagnostic count.
    pub async fn diagnostics_by_tree(pool: &PgPool) -> Result<Vec<TreeUsageCount>, sqlx::Error> {
        sqlx::query_as::<_, TreeUsageCount>(
            "SELECT tree_name, COUNT(*) AS count
             FROM diagnostic_sessions
             GROUP BY tree_name
             ORDER BY count DESC, tree_name
             LIMIT 10",
        )
        .fetch_all(pool)
        .await
    }
}
