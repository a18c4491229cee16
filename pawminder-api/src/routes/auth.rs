/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login` - Exchange credentials for a bearer token
/// - `GET /auth/me` - Echo the account behind a bearer token
///
/// There is no logout or refresh: tokens never expire.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use pawminder_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::account::{Account, CreateAccount},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register and login request
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (any non-empty value)
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
}

/// `GET /auth/me` response
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub account_id: Uuid,
}

/// Register a new account
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "email": "owner@example.com", "password": "pw" }
/// ```
///
/// Returns the created account (`id`, `email`, `created_at`). The email is
/// not checked beforehand; the store's unique constraint decides.
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Malformed email or empty password
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<Account>> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            email: req.email.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(account_id = %account.id, "Account registered");

    Ok(Json(account))
}

/// Log in
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "email": "owner@example.com", "password": "pw" }
/// ```
///
/// Returns `{ "token": "eyJ..." }`.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (same message for both)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let account = Account::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    if !password::verify_password(&req.password, &account.password_hash)? {
        tracing::debug!(account_id = %account.id, "Login rejected");
        return Err(ApiError::invalid_credentials());
    }

    let token = jwt::create_token(&jwt::Claims::new(account.id), state.jwt_secret())?;

    Ok(Json(LoginResponse { token }))
}

/// Returns the account ID the bearer token was issued to
pub async fn me(Extension(auth): Extension<AuthContext>) -> Json<MeResponse> {
    Json(MeResponse {
        account_id: auth.account_id,
    })
}
