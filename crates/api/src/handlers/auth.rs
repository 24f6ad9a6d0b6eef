//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! current profile, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use clinidex_core::error::CoreError;
use clinidex_core::roles::ROLE_FREEMIUM;
use clinidex_core::types::DbId;
use clinidex_db::models::session::CreateSession;
use clinidex_db::models::user::{CreateUser, UserResponse};
use clinidex_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

/// Minimum password length for registration and password changes.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Public self-registration. New accounts always get the freemium role;
/// upgrades go through an admin.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: input.email,
        password_hash: hashed,
        name: input.name,
        role: ROLE_FREEMIUM.to_string(),
    };

    // A duplicate email surfaces as a 409 via the unique-constraint classifier.
    let user = UserRepo::create(&state.pool, &create).await?;
    Ok((StatusCode::CREATED, Json(user.to_response())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
/// Failure messages never distinguish a wrong email from a wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        let new_count = user.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response =
        create_auth_response(&state, user.id, &user.email, &user.name, &user.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens
/// (token rotation: the presented session is revoked).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response =
        create_auth_response(&state, user.id, &user.email, &user.name, &user.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Current user's profile.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;
    Ok(Json(user.to_response()))
}

/// PUT /api/v1/auth/password
///
/// Change the authenticated user's own password. Requires the current
/// password; all sessions are revoked afterwards.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    email: &str,
    name: &str,
    role: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
            name: name.to_string(),
            role: role.to_string(),
        },
    })
}
