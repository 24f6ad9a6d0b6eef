//! Startup provisioning: make sure the configured admin account exists.

use clinidex_core::roles::ROLE_ADMIN;
use clinidex_db::models::user::CreateUser;
use clinidex_db::repositories::UserRepo;
use clinidex_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Ensure the admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD` exists.
///
/// Idempotent: if a user with the configured email already exists it is left
/// untouched (its password is NOT rotated from the environment).
pub async fn ensure_admin(pool: &DbPool, bootstrap: &AdminBootstrap) -> AppResult<()> {
    if let Some(existing) = UserRepo::find_by_email(pool, &bootstrap.email).await? {
        tracing::info!(user_id = existing.id, email = %bootstrap.email, "Admin account already exists");
        return Ok(());
    }

    let hashed = hash_password(&bootstrap.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: bootstrap.email.clone(),
        password_hash: hashed,
        name: bootstrap.name.clone(),
        role: ROLE_ADMIN.to_string(),
    };
    let admin = UserRepo::create(pool, &create).await?;
    tracing::info!(user_id = admin.id, email = %admin.email, "Admin account created");
    Ok(())
}
