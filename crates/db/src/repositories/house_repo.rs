//! Repository for the `custom_houses` table.
//!
//! Every query is scoped by `user_id`: a house owned by someone else is
//! indistinguishable from one that does not exist.

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::house::{House, HouseInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, location, style, bedrooms, bathrooms, square_feet, \
                        exterior_color, roof_type, flooring_type, kitchen_style, \
                        has_pool, has_garage, garage_spaces, has_deck, has_fireplace, \
                        landscape_type, price_estimate, image_url, notes, created_at, updated_at";

/// Provides CRUD operations for saved house designs.
pub struct HouseRepo;

impl HouseRepo {
    /// Insert a new design for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &HouseInput,
    ) -> Result<House, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_houses (
                user_id, name, location, style, bedrooms, bathrooms, square_feet,
                exterior_color, roof_type, flooring_type, kitchen_style,
                has_pool, has_garage, garage_spaces, has_deck, has_fireplace,
                landscape_type, price_estimate, image_url, notes
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.style)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_feet)
            .bind(&input.exterior_color)
            .bind(&input.roof_type)
            .bind(&input.flooring_type)
            .bind(&input.kitchen_style)
            .bind(input.has_pool)
            .bind(input.has_garage)
            .bind(input.garage_spaces)
            .bind(input.has_deck)
            .bind(input.has_fireplace)
            .bind(&input.landscape_type)
            .bind(input.price_estimate)
            .bind(&input.image_url)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find one of `user_id`'s designs by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<House>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM custom_houses WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List `user_id`'s designs, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<House>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM custom_houses
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every configuration column of one of `user_id`'s designs.
    ///
    /// Returns `None` if no such row exists for this user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &HouseInput,
    ) -> Result<Option<House>, sqlx::Error> {
        let query = format!(
            "UPDATE custom_houses SET
                name = $3,
                location = $4,
                style = $5,
                bedrooms = $6,
                bathrooms = $7,
                square_feet = $8,
                exterior_color = $9,
                roof_type = $10,
                flooring_type = $11,
                kitchen_style = $12,
                has_pool = $13,
                has_garage = $14,
                garage_spaces = $15,
                has_deck = $16,
                has_fireplace = $17,
                landscape_type = $18,
                price_estimate = $19,
                image_url = $20,
                notes = $21
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.style)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_feet)
            .bind(&input.exterior_color)
            .bind(&input.roof_type)
            .bind(&input.flooring_type)
            .bind(&input.kitchen_style)
            .bind(input.has_pool)
            .bind(input.has_garage)
            .bind(input.garage_spaces)
            .bind(input.has_deck)
            .bind(input.has_fireplace)
            .bind(&input.landscape_type)
            .bind(input.price_estimate)
            .bind(&input.image_url)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of `user_id`'s designs. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM custom_houses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
