//! Access and refresh tokens.
//!
//! Access tokens are short-lived HS256 JWTs issued by `hearth`. Refresh tokens
//! are opaque strings handed to the client once; the database keeps only
//! their SHA-256 digest.

use chrono::{Duration, Utc};
use hearth_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `iss` claim written into and required from every access token.
pub const ISSUER: &str = "hearth";

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub username: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `JWT_SECRET`              | required |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `60`     |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`      |
    ///
    /// Panics on a missing or empty secret, or a non-numeric expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let expiry = |key: &str, default: i64| -> i64 {
            match std::env::var(key) {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .unwrap_or_else(|_| panic!("{key} must be a whole number, got '{raw}'")),
                Err(_) => default,
            }
        };

        Self {
            secret,
            access_token_expiry_mins: expiry("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: expiry(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

pub fn generate_access_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let claims = Claims {
        sub: user_id,
        username: username.to_owned(),
        iss: ISSUER.to_owned(),
        exp: (issued_at + config.access_ttl()).timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Decode an access token, checking signature, expiry and issuer.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// A new refresh token as `(plaintext, digest)`.
pub fn generate_refresh_token() -> (String, String) {
    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let digest = hash_refresh_token(&token);
    (token, digest)
}

/// Lowercase hex SHA-256 of `token`.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
