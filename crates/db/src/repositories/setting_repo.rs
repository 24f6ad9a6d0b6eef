//! Repository for the `settings` table.
//!
//! One row per key; writes are upserts with last-write-wins semantics and no
//! optimistic concurrency check (accepted limitation, see DESIGN.md).

use sqlx::PgPool;

use crate::models::setting::Setting;

const COLUMNS: &str = "key, value, updated_at";

/// Provides read/write access to global settings.
pub struct SettingRepo;

impl SettingRepo {
    /// Fetch one setting by key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE key = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one setting value by key.
    pub async fn value(pool: &PgPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        Ok(Self::find_by_key(pool, key).await?.map(|s| s.value))
    }

    /// Insert or replace a setting. Last write wins.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value)
             VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
