pub mod auth;
pub mod health;
pub mod houses;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /houses/pricing                                  price catalog (public)
/// /houses/rules                                    compatibility rules (public)
/// /houses/calculate-price                          estimate (public)
/// /houses/validate                                 rule check (public)
/// /houses/disabled-options                         options to hide (public)
///
/// /houses                                          list, create (requires auth)
/// /houses/{id}                                     get, update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/houses", houses::router())
}
