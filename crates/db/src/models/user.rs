//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use clinidex_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    /// One of the closed role set; unrecognized values are non-privileged.
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

/// DTO for updating an existing user. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}
