use std::sync::Arc;

use hearth_core::catalog::Catalog;
use hearth_core::compatibility::RuleTable;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hearth_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Price list, loaded once at startup.
    pub catalog: Arc<Catalog>,
    /// Compatibility rules, loaded once at startup.
    pub rules: Arc<RuleTable>,
}
