//! Refresh-token sessions.

use hearth_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An outstanding refresh token. Only the SHA-256 hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    /// Client `User-Agent`, kept for auditing which device holds a token.
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
}
