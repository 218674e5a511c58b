//! Handlers for the public configurator endpoints under `/houses`.
//!
//! These are identity-agnostic and never touch the database: each one runs
//! a pure engine over the shared catalog and rule table.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hearth_core::catalog::Catalog;
use hearth_core::compatibility::{self, DisabledOptions, RuleTable, ValidationResult};
use hearth_core::configuration::HouseConfiguration;
use hearth_core::pricing::{self, PriceLine};
use hearth_core::types::Price;
use serde::Serialize;

use crate::state::AppState;

/// Response body for `POST /houses/calculate-price`.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub price: Price,
    pub breakdown: Vec<PriceLine>,
}

// Bodies are typed structs serialized straight into the response so that
// catalog and rule order survive. A `serde_json::Value` would sort the keys.

#[derive(Debug, Serialize)]
pub struct PricingResponse<'a> {
    pub pricing: &'a Catalog,
}

#[derive(Debug, Serialize)]
pub struct RulesResponse<'a> {
    pub rules: &'a RuleTable,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledOptionsResponse {
    pub disabled_options: DisabledOptions,
}

/// GET /api/v1/houses/pricing
pub async fn pricing(State(state): State<AppState>) -> Response {
    Json(PricingResponse {
        pricing: &state.catalog,
    })
    .into_response()
}

/// GET /api/v1/houses/rules
pub async fn rules(State(state): State<AppState>) -> Response {
    Json(RulesResponse {
        rules: &state.rules,
    })
    .into_response()
}

/// POST /api/v1/houses/calculate-price
pub async fn calculate_price(
    State(state): State<AppState>,
    Json(config): Json<HouseConfiguration>,
) -> Json<PriceResponse> {
    let breakdown = pricing::price_breakdown(&config, &state.catalog);
    Json(PriceResponse {
        price: breakdown.total,
        breakdown: breakdown.lines,
    })
}

/// POST /api/v1/houses/validate
pub async fn validate(
    State(state): State<AppState>,
    Json(config): Json<HouseConfiguration>,
) -> Json<ValidationResult> {
    Json(compatibility::validate(&config, &state.rules))
}

/// POST /api/v1/houses/disabled-options
pub async fn disabled_options(
    State(state): State<AppState>,
    Json(config): Json<HouseConfiguration>,
) -> Json<DisabledOptionsResponse> {
    Json(DisabledOptionsResponse {
        disabled_options: compatibility::disabled_options(&config, &state.rules, &state.catalog),
    })
}
