use crate::types::{DbId, Price};

/// Domain failures surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Malformed static data (catalog or rule table).
///
/// Only produced while loading, before the server starts accepting requests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{table}: price for '{key}' must be a non-negative number, got {price}")]
    InvalidPrice {
        table: String,
        key: String,
        price: Price,
    },

    #[error("{table}: duplicate key '{key}'")]
    DuplicateKey { table: String, key: String },

    #[error("{table} '{key}': range on {field} has min {min} greater than max {max}")]
    InvertedRange {
        table: String,
        key: String,
        field: String,
        min: i64,
        max: i64,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
