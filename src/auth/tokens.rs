//! JWT issuance and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::models::{Claims, TokenPair, TokenType};
use crate::common::config::JwtConfig;
use crate::common::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("expected {expected} token, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => ApiError::InternalServer(format!("token signing: {}", e)),
            TokenError::Invalid(_) => ApiError::Unauthorized("invalid token".to_string()),
            TokenError::WrongType { expected, .. } => {
                ApiError::Unauthorized(format!("{} token required", expected))
            }
        }
    }
}

fn sign(
    jwt: &JwtConfig,
    user_id: &str,
    token_type: TokenType,
    ttl_minutes: i64,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(ttl_minutes)).timestamp() as usize,
        token_type,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Issues a fresh access/refresh pair for the user
pub fn issue_token_pair(jwt: &JwtConfig, user_id: &str) -> Result<TokenPair, TokenError> {
    Ok(TokenPair {
        access: sign(jwt, user_id, TokenType::Access, jwt.access_ttl_minutes)?,
        refresh: sign(jwt, user_id, TokenType::Refresh, jwt.refresh_ttl_minutes)?,
    })
}

/// Validates signature and expiry, then checks the token is of the expected kind
pub fn verify_token(
    jwt: &JwtConfig,
    token: &str,
    expected: TokenType,
) -> Result<Claims, TokenError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    if decoded.claims.token_type != expected {
        return Err(TokenError::WrongType {
            expected: expected.as_str(),
            actual: decoded.claims.token_type.as_str(),
        });
    }

    Ok(decoded.claims)
}

/// Strips an optional `Bearer ` prefix from an Authorization header value
pub fn bearer_token(header_value: &str) -> &str {
    header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim()
}
