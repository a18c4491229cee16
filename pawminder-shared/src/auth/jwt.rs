/// Bearer token generation and validation
///
/// Login issues an HS256-signed JWT whose subject is the account ID.
///
/// # Lifetime
///
/// Tokens carry no `exp` claim and there is no refresh or revocation: a
/// token stays valid until the signing secret changes. Validation therefore
/// checks only the signature and the issuer.
///
/// # Example
///
/// ```
/// use pawminder_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let account_id = Uuid::new_v4();
/// let secret = "a-secret-of-at-least-thirty-two-bytes!!";
///
/// let token = create_token(&Claims::new(account_id), secret)?;
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, account_id);
/// # Ok(())
/// # }
/// ```

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer written into and required from every token
pub const ISSUER: &str = "pawminder";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature or format check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token was issued by someone else
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Token claims
///
/// - `sub`: account ID
/// - `iss`: always [`ISSUER`]
/// - `iat`: issue time (Unix seconds), informational only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
}

impl Claims {
    /// Claims for `account_id`, issued now
    pub fn new(account_id: Uuid) -> Self {
        Self {
            sub: account_id,
            iss: ISSUER.to_string(),
            iat: Utc::now().timestamp(),
        }
    }
}

/// Signs claims with HS256
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies signature and issuer, returning the claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.set_issuer(&[ISSUER]);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
