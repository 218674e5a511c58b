//! Handlers for saved house designs (`/houses`, `/houses/{id}`).
//!
//! Every handler is scoped to the authenticated user. Writes run the same
//! pipeline: storability checks (400), compatibility rules (422), then a
//! server-side price estimate that overrides anything the client sent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hearth_core::compatibility::{self, FieldViolation};
use hearth_core::configuration::{ConfigurationPatch, HouseConfiguration};
use hearth_core::error::CoreError;
use hearth_core::pricing;
use hearth_core::types::DbId;
use hearth_db::models::house::{House, HouseInput};
use hearth_db::repositories::HouseRepo;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for create and update.
#[derive(Debug, Serialize)]
pub struct HouseSaved {
    pub message: &'static str,
    pub house: House,
    /// Non-fatal rule warnings for the saved design.
    pub warnings: Vec<FieldViolation>,
}

/// GET /api/v1/houses
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Value>> {
    let houses = HouseRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "houses": houses })))
}

/// GET /api/v1/houses/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let house = find_owned(&state, &user, id).await?;
    Ok(Json(json!({ "house": house })))
}

/// POST /api/v1/houses
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(config): Json<HouseConfiguration>,
) -> AppResult<(StatusCode, Json<HouseSaved>)> {
    let (input, warnings) = prepare(&state, &config)?;
    let house = HouseRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        house_id = house.id,
        price_estimate = input.price_estimate,
        "House created"
    );

    Ok((
        StatusCode::CREATED,
        Json(HouseSaved {
            message: "House created successfully",
            house,
            warnings,
        }),
    ))
}

/// PUT /api/v1/houses/{id}
///
/// Partial update: omitted fields keep their stored values. The merged
/// design is re-validated and re-priced as a whole.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(patch): Json<ConfigurationPatch>,
) -> AppResult<Json<HouseSaved>> {
    let existing = find_owned(&state, &user, id).await?;
    let merged = patch.apply(existing.to_configuration())?;

    let (input, warnings) = prepare(&state, &merged)?;
    let house = HouseRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "House", id })?;
    tracing::info!(user_id = user.user_id, house_id = id, "House updated");

    Ok(Json(HouseSaved {
        message: "House updated successfully",
        house,
        warnings,
    }))
}

/// DELETE /api/v1/houses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if !HouseRepo::delete(&state.pool, user.user_id, id).await? {
        return Err(CoreError::NotFound { entity: "House", id }.into());
    }
    tracing::info!(user_id = user.user_id, house_id = id, "House deleted");
    Ok(Json(json!({ "message": "House deleted successfully" })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<House> {
    HouseRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "House", id }.into())
}

/// Check, validate and price `config`, yielding the row to write.
fn prepare(
    state: &AppState,
    config: &HouseConfiguration,
) -> AppResult<(HouseInput, Vec<FieldViolation>)> {
    config.check_persistable()?;

    let verdict = compatibility::validate(config, &state.rules);
    if !verdict.is_valid {
        tracing::debug!(errors = verdict.errors.len(), "Rejected invalid configuration");
        return Err(AppError::InvalidConfiguration(verdict));
    }

    let price = pricing::calculate_price(config, &state.catalog);
    let input = HouseInput::from_configuration(config, price)?;
    Ok((input, verdict.warnings))
}
