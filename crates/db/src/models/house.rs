//! Saved house design model and DTOs.

use hearth_core::configuration::{ConfigField, HouseConfiguration};
use hearth_core::error::CoreError;
use hearth_core::types::{DbId, Price, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `custom_houses` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct House {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub location: String,
    pub style: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_feet: Option<i32>,
    pub exterior_color: Option<String>,
    pub roof_type: Option<String>,
    pub flooring_type: Option<String>,
    pub kitchen_style: Option<String>,
    pub has_pool: bool,
    pub has_garage: bool,
    pub garage_spaces: Option<i32>,
    pub has_deck: bool,
    pub has_fireplace: bool,
    pub landscape_type: Option<String>,
    pub price_estimate: Option<Price>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl House {
    /// The stored design as an engine input.
    pub fn to_configuration(&self) -> HouseConfiguration {
        HouseConfiguration {
            name: Some(self.name.clone()),
            location: Some(self.location.clone()),
            style: self.style.clone(),
            bedrooms: self.bedrooms.map(i64::from),
            bathrooms: self.bathrooms.map(i64::from),
            square_feet: self.square_feet.map(i64::from),
            exterior_color: self.exterior_color.clone(),
            roof_type: self.roof_type.clone(),
            flooring_type: self.flooring_type.clone(),
            kitchen_style: self.kitchen_style.clone(),
            landscape_type: self.landscape_type.clone(),
            has_pool: self.has_pool,
            has_garage: self.has_garage,
            garage_spaces: self.garage_spaces.map(i64::from),
            has_deck: self.has_deck,
            has_fireplace: self.has_fireplace,
            price_estimate: self.price_estimate,
            image_url: self.image_url.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Column values written by both insert and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseInput {
    pub name: String,
    pub location: String,
    pub style: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_feet: Option<i32>,
    pub exterior_color: Option<String>,
    pub roof_type: Option<String>,
    pub flooring_type: Option<String>,
    pub kitchen_style: Option<String>,
    pub has_pool: bool,
    pub has_garage: bool,
    pub garage_spaces: Option<i32>,
    pub has_deck: bool,
    pub has_fireplace: bool,
    pub landscape_type: Option<String>,
    pub price_estimate: Price,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

impl HouseInput {
    /// Build the row for `config` with a freshly computed estimate.
    ///
    /// Fails with [`CoreError::Validation`] if the configuration is not
    /// storable (see [`HouseConfiguration::check_persistable`]).
    pub fn from_configuration(
        config: &HouseConfiguration,
        price_estimate: Price,
    ) -> Result<Self, CoreError> {
        config.check_persistable()?;
        let required = |value: &Option<String>, what: &str| {
            value
                .clone()
                .ok_or_else(|| CoreError::Validation(format!("{what} is required")))
        };

        Ok(Self {
            name: required(&config.name, "Name")?,
            location: required(&config.location, "Location")?,
            style: config.style.clone(),
            bedrooms: column_count(ConfigField::Bedrooms, config.bedrooms)?,
            bathrooms: column_count(ConfigField::Bathrooms, config.bathrooms)?,
            square_feet: column_count(ConfigField::SquareFeet, config.square_feet)?,
            exterior_color: config.exterior_color.clone(),
            roof_type: config.roof_type.clone(),
            flooring_type: config.flooring_type.clone(),
            kitchen_style: config.kitchen_style.clone(),
            has_pool: config.has_pool,
            has_garage: config.has_garage,
            garage_spaces: column_count(ConfigField::GarageSpaces, config.garage_spaces)?,
            has_deck: config.has_deck,
            has_fireplace: config.has_fireplace,
            landscape_type: config.landscape_type.clone(),
            price_estimate,
            image_url: config.image_url.clone(),
            notes: config.notes.clone(),
        })
    }
}

fn column_count(field: ConfigField, value: Option<i64>) -> Result<Option<i32>, CoreError> {
    value
        .map(|n| {
            i32::try_from(n)
                .map_err(|_| CoreError::Validation(format!("{field} is out of range: {n}")))
        })
        .transpose()
}
