//! Route definitions for the `/houses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{configurator, houses};
use crate::state::AppState;

/// Routes mounted at `/houses`.
///
/// Static configurator paths take precedence over `/{id}`.
///
/// ```text
/// GET    /pricing           -> configurator::pricing
/// GET    /rules             -> configurator::rules
/// POST   /calculate-price   -> configurator::calculate_price
/// POST   /validate          -> configurator::validate
/// POST   /disabled-options  -> configurator::disabled_options
///
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pricing", get(configurator::pricing))
        .route("/rules", get(configurator::rules))
        .route("/calculate-price", post(configurator::calculate_price))
        .route("/validate", post(configurator::validate))
        .route("/disabled-options", post(configurator::disabled_options))
        .route("/", get(houses::list).post(houses::create))
        .route(
            "/{id}",
            get(houses::get).put(houses::update).delete(houses::delete),
        )
}
