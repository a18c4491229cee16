/// Authentication middleware for Axum
///
/// Two credentials guard the HTTP surfaces:
///
/// - **Bearer token**: `Authorization: Bearer <jwt>` on account routes such
///   as `/auth/me`. On success an [`AuthContext`] is added to the request
///   extensions.
/// - **Public key**: `apikey: <key>` on the `/rest/v1` collection surface.
///   The key is a deployment-wide shared value, not a per-account secret,
///   so it identifies the client application and nothing more.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use pawminder_shared::auth::middleware::{create_jwt_middleware, AuthContext};
///
/// async fn me(Extension(auth): Extension<AuthContext>) -> String {
///     auth.account_id.to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn(create_jwt_middleware("secret".to_string())));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Header carrying the public collection key
pub const API_KEY_HEADER: &str = "apikey";

/// Authenticated caller, added to request extensions by the bearer middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Account the token was issued to
    pub account_id: Uuid,
}

impl AuthContext {
    pub fn new(account_id: Uuid) -> Self {
        Self { account_id }
    }
}

/// Error type for authentication middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),

    /// Public key did not match
    InvalidApiKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg),
            AuthError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key".to_string()),
        };

        let body = json!({
            "error": "unauthorized",
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Extracts the token from an `Authorization` header value
pub fn parse_bearer(value: &str) -> Result<&str, AuthError> {
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("Empty Bearer token".to_string()));
    }

    Ok(token)
}

/// Bearer token middleware
///
/// # Errors
///
/// - 401 when the header is missing or the token fails validation
/// - 400 when the header is not a Bearer token
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = parse_bearer(auth_header)?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    req.extensions_mut().insert(AuthContext::new(claims.sub));

    Ok(next.run(req).await)
}

/// Public key middleware for the collection surface
///
/// Rejects the request with 401 unless the `apikey` header equals `expected`.
pub async fn api_key_middleware(
    expected: String,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    if provided != expected {
        tracing::debug!("Rejected request with mismatched API key");
        return Err(AuthError::InvalidApiKey);
    }

    Ok(next.run(req).await)
}

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AuthError>> + Send>>;

/// Creates a bearer token middleware closure capturing the signing secret
pub fn create_jwt_middleware(
    secret: String,
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone {
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}

/// Creates a public key middleware closure capturing the expected key
pub fn create_api_key_middleware(
    expected: String,
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone {
    move |req, next| {
        let expected = expected.clone();
        Box::pin(api_key_middleware(expected, req, next))
    }
}
