//! The house configuration priced and validated by the engines.
//!
//! Configurations arrive straight from in-progress form state, so decoding is
//! deliberately forgiving: empty strings, `null`, and values of the wrong JSON
//! type decode as "absent" instead of failing the request. See [`lenient`].

use serde::{Deserialize, Serialize};

use crate::catalog::OptionCategory;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A (possibly partial) custom house design.
///
/// Every field is optional. Engines treat absent fields and values that are
/// not catalog keys as contributing nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseConfiguration {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bedrooms: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bathrooms: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub square_feet: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub exterior_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub roof_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub flooring_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub kitchen_style: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub landscape_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_pool: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_garage: bool,
    /// Number of parking spaces; only meaningful when `has_garage` is set.
    #[serde(default, deserialize_with = "lenient::count")]
    pub garage_spaces: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_deck: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_fireplace: bool,
    /// Derived by the server on save; never used as pricing input.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price_estimate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}

impl HouseConfiguration {
    /// Current value of a rule-addressable field.
    pub fn value(&self, field: ConfigField) -> FieldValue<'_> {
        fn text(v: &Option<String>) -> FieldValue<'_> {
            v.as_deref().map_or(FieldValue::Absent, FieldValue::Text)
        }
        fn count<'a>(v: Option<i64>) -> FieldValue<'a> {
            v.map_or(FieldValue::Absent, FieldValue::Count)
        }

        match field {
            ConfigField::Location => text(&self.location),
            ConfigField::Style => text(&self.style),
            ConfigField::Bedrooms => count(self.bedrooms),
            ConfigField::Bathrooms => count(self.bathrooms),
            ConfigField::SquareFeet => count(self.square_feet),
            ConfigField::ExteriorColor => text(&self.exterior_color),
            ConfigField::RoofType => text(&self.roof_type),
            ConfigField::FlooringType => text(&self.flooring_type),
            ConfigField::KitchenStyle => text(&self.kitchen_style),
            ConfigField::LandscapeType => text(&self.landscape_type),
            ConfigField::HasPool => FieldValue::Flag(self.has_pool),
            ConfigField::HasGarage => FieldValue::Flag(self.has_garage),
            ConfigField::GarageSpaces => count(self.garage_spaces),
            ConfigField::HasDeck => FieldValue::Flag(self.has_deck),
            ConfigField::HasFireplace => FieldValue::Flag(self.has_fireplace),
        }
    }

    /// Checks required before a configuration may be saved.
    ///
    /// The engines accept anything; storage needs a name, a location, and
    /// counts that fit the schema.
    pub fn check_persistable(&self) -> Result<(), CoreError> {
        if self.name.is_none() {
            return Err(CoreError::Validation("Name is required".into()));
        }
        if self.location.is_none() {
            return Err(CoreError::Validation("Location is required".into()));
        }

        let counts = [
            (ConfigField::Bedrooms, self.bedrooms),
            (ConfigField::Bathrooms, self.bathrooms),
            (ConfigField::SquareFeet, self.square_feet),
            (ConfigField::GarageSpaces, self.garage_spaces),
        ];
        for (field, value) in counts {
            if let Some(n) = value {
                if n < 0 || n > i64::from(i32::MAX) {
                    return Err(CoreError::Validation(format!(
                        "{field} must be between 0 and {}, got {n}",
                        i32::MAX
                    )));
                }
            }
        }

        if self.has_garage && self.garage_spaces == Some(0) {
            return Err(CoreError::Validation(
                "garage_spaces must be at least 1 when a garage is selected".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// A partial update to a saved configuration.
///
/// Unlike [`HouseConfiguration`], booleans are tri-state here so that an
/// omitted checkbox keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigurationPatch {
    /// Kept verbatim (trimmed) so that a blank value can be refused.
    #[serde(default, deserialize_with = "lenient::raw_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::raw_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bedrooms: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bathrooms: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub square_feet: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub exterior_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub roof_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub flooring_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub kitchen_style: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub landscape_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub has_pool: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub has_garage: Option<bool>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub garage_spaces: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub has_deck: Option<bool>,
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub has_fireplace: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}

impl ConfigurationPatch {
    /// Overlay the present fields of this patch onto `base`.
    ///
    /// `name` and `location` may be omitted but not blanked.
    /// `price_estimate` is never patched; it is recomputed on save.
    pub fn apply(self, base: HouseConfiguration) -> Result<HouseConfiguration, CoreError> {
        if self.name.as_deref() == Some("") {
            return Err(CoreError::Validation("Name cannot be empty".into()));
        }
        if self.location.as_deref() == Some("") {
            return Err(CoreError::Validation("Location cannot be empty".into()));
        }

        Ok(HouseConfiguration {
            name: self.name.or(base.name),
            location: self.location.or(base.location),
            style: self.style.or(base.style),
            bedrooms: self.bedrooms.or(base.bedrooms),
            bathrooms: self.bathrooms.or(base.bathrooms),
            square_feet: self.square_feet.or(base.square_feet),
            exterior_color: self.exterior_color.or(base.exterior_color),
            roof_type: self.roof_type.or(base.roof_type),
            flooring_type: self.flooring_type.or(base.flooring_type),
            kitchen_style: self.kitchen_style.or(base.kitchen_style),
            landscape_type: self.landscape_type.or(base.landscape_type),
            has_pool: self.has_pool.unwrap_or(base.has_pool),
            has_garage: self.has_garage.unwrap_or(base.has_garage),
            garage_spaces: self.garage_spaces.or(base.garage_spaces),
            has_deck: self.has_deck.unwrap_or(base.has_deck),
            has_fireplace: self.has_fireplace.unwrap_or(base.has_fireplace),
            price_estimate: base.price_estimate,
            image_url: self.image_url.or(base.image_url),
            notes: self.notes.or(base.notes),
        })
    }
}

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// A configuration field that rules can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    Location,
    Style,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    ExteriorColor,
    RoofType,
    FlooringType,
    KitchenStyle,
    LandscapeType,
    HasPool,
    HasGarage,
    GarageSpaces,
    HasDeck,
    HasFireplace,
}

impl ConfigField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Style => "style",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::SquareFeet => "square_feet",
            Self::ExteriorColor => "exterior_color",
            Self::RoofType => "roof_type",
            Self::FlooringType => "flooring_type",
            Self::KitchenStyle => "kitchen_style",
            Self::LandscapeType => "landscape_type",
            Self::HasPool => "has_pool",
            Self::HasGarage => "has_garage",
            Self::GarageSpaces => "garage_spaces",
            Self::HasDeck => "has_deck",
            Self::HasFireplace => "has_fireplace",
        }
    }

    /// The catalog category whose keys this field takes, if any.
    pub fn category(self) -> Option<OptionCategory> {
        match self {
            Self::Location => Some(OptionCategory::Location),
            Self::Style => Some(OptionCategory::Style),
            Self::ExteriorColor => Some(OptionCategory::ExteriorColor),
            Self::RoofType => Some(OptionCategory::RoofType),
            Self::FlooringType => Some(OptionCategory::FlooringType),
            Self::KitchenStyle => Some(OptionCategory::KitchenStyle),
            Self::LandscapeType => Some(OptionCategory::LandscapeType),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of one field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Count(i64),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_count(self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(n),
            _ => None,
        }
    }

    /// Whether the field carries a selection (`false` flags do not).
    pub fn is_set(self) -> bool {
        match self {
            Self::Absent => false,
            Self::Flag(b) => b,
            Self::Text(_) | Self::Count(_) => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

/// Forgiving `deserialize_with` helpers.
///
/// Each reads an arbitrary JSON value and maps anything unusable to the
/// "absent" representation rather than returning an error.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-empty trimmed string; anything else is absent.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        })
    }

    /// Any JSON string, trimmed but possibly empty; other values are absent.
    pub fn raw_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
    }

    /// Whole number from a JSON integer, an integral float, or a numeric string.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        })
    }

    /// Finite number from a JSON number or a numeric string.
    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite()))
    }

    /// `true` only for JSON `true` or the string `"true"`.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(optional_flag(d)?.unwrap_or(false))
    }

    /// Tri-state boolean: absent unless the value is a recognisable boolean.
    pub fn optional_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    fn integral(v: f64) -> Option<i64> {
        (v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64).then_some(v as i64)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn decode(value: serde_json::Value) -> HouseConfiguration {
        serde_json::from_value(value).expect("lenient decoding never fails on objects")
    }

    #[test]
    fn empty_object_is_all_absent() {
        assert_eq!(decode(json!({})), HouseConfiguration::default());
    }

    #[test]
    fn form_placeholders_decode_as_absent() {
        let config = decode(json!({
            "location": "",
            "bedrooms": "",
            "square_feet": null,
            "has_pool": "",
            "garage_spaces": "lots"
        }));
        assert_eq!(config.location, None);
        assert_eq!(config.bedrooms, None);
        assert_eq!(config.square_feet, None);
        assert!(!config.has_pool);
        assert_eq!(config.garage_spaces, None);
    }

    #[test]
    fn numeric_strings_and_integral_floats_are_counts() {
        let config = decode(json!({ "bedrooms": "3", "bathrooms": 2.0, "square_feet": 1500.5 }));
        assert_eq!(config.bedrooms, Some(3));
        assert_eq!(config.bathrooms, Some(2));
        assert_eq!(config.square_feet, None);
    }

    #[test]
    fn zero_is_present_not_absent() {
        let config = decode(json!({ "bedrooms": 0 }));
        assert_eq!(config.bedrooms, Some(0));
        assert_eq!(config.value(ConfigField::Bedrooms), FieldValue::Count(0));
    }

    #[test]
    fn wrong_types_and_unknown_keys_are_ignored() {
        let config = decode(json!({
            "style": 42,
            "has_deck": 1,
            "has_fireplace": "true",
            "basement": "finished"
        }));
        assert_eq!(config.style, None);
        assert!(!config.has_deck);
        assert!(config.has_fireplace);
    }

    #[test]
    fn text_is_trimmed() {
        let config = decode(json!({ "landscape_type": "  Lush Garden " }));
        assert_eq!(config.landscape_type.as_deref(), Some("Lush Garden"));
    }

    #[test]
    fn value_reports_field_kinds() {
        let config = decode(json!({ "location": "NYC", "has_pool": true }));
        assert_eq!(config.value(ConfigField::Location), FieldValue::Text("NYC"));
        assert_eq!(config.value(ConfigField::Style), FieldValue::Absent);
        assert!(config.value(ConfigField::HasPool).is_set());
        assert!(!config.value(ConfigField::HasDeck).is_set());
    }

    #[test]
    fn patch_keeps_unmentioned_fields() {
        let base = decode(json!({
            "name": "Cabin",
            "location": "Forest",
            "has_deck": true,
            "bedrooms": 2
        }));
        let patch: ConfigurationPatch =
            serde_json::from_value(json!({ "bedrooms": 3, "has_pool": true })).unwrap();
        let merged = patch.apply(base).unwrap();
        assert_eq!(merged.name.as_deref(), Some("Cabin"));
        assert_eq!(merged.bedrooms, Some(3));
        assert!(merged.has_deck);
        assert!(merged.has_pool);
    }

    #[test]
    fn patch_can_clear_a_flag() {
        let base = decode(json!({ "has_deck": true }));
        let patch: ConfigurationPatch =
            serde_json::from_value(json!({ "has_deck": false })).unwrap();
        assert!(!patch.apply(base).unwrap().has_deck);
    }

    #[test]
    fn patch_refuses_blank_name_or_location() {
        let base = decode(json!({ "name": "Cabin", "location": "Forest" }));

        let patch: ConfigurationPatch = serde_json::from_value(json!({ "name": "  " })).unwrap();
        let err = patch.apply(base.clone()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Name cannot be empty");

        let patch: ConfigurationPatch = serde_json::from_value(json!({ "location": "" })).unwrap();
        let err = patch.apply(base.clone()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Location cannot be empty");

        // Null or a non-string still means "leave unchanged".
        let patch: ConfigurationPatch =
            serde_json::from_value(json!({ "name": null, "location": 5 })).unwrap();
        let merged = patch.apply(base).unwrap();
        assert_eq!(merged.name.as_deref(), Some("Cabin"));
        assert_eq!(merged.location.as_deref(), Some("Forest"));
    }

    #[test]
    fn persistable_requires_name_and_location() {
        let err = decode(json!({ "location": "NYC" }))
            .check_persistable()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Name"));

        let err = decode(json!({ "name": "Loft" })).check_persistable().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Location"));

        assert!(decode(json!({ "name": "Loft", "location": "NYC" }))
            .check_persistable()
            .is_ok());
    }

    #[test]
    fn persistable_rejects_negative_counts_and_empty_garages() {
        let err = decode(json!({ "name": "A", "location": "NYC", "bathrooms": -1 }))
            .check_persistable()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("bathrooms"));

        let err = decode(json!({
            "name": "A", "location": "NYC", "has_garage": true, "garage_spaces": 0
        }))
        .check_persistable()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("garage_spaces"));
    }
}
