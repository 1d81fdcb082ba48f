use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// JWT claims carried by every issued token.
///
/// `sub` holds the acting user's id; `exp`/`iat` are the standard timing
/// claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Generate a signed HS256 token for the given user, expiring after the
/// configured number of days.
///
/// # Errors
/// Returns `jsonwebtoken::errors::Error` if token encoding fails
pub fn generate_token(
    config: &Config,
    user_id: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + (config.jwt.expiration_days * 86400) as usize;

    let claims = Claims {
        sub: user_id.to_owned(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
    )
}

/// Verify signature and expiration, returning the decoded claims.
///
/// # Errors
/// Returns `jsonwebtoken::errors::Error` if token is invalid, expired, or malformed
pub fn verify_token(config: &Config, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt.secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}
