//! Rule table and validation result types.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::configuration::{ConfigField, HouseConfiguration};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A compatibility rule attached to a location or style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Incompatibility(IncompatibilityRule),
    Range(RangeRestriction),
    Warning(WarningRule),
}

/// Violated when `field` currently holds one of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncompatibilityRule {
    pub field: ConfigField,
    pub values: Vec<String>,
    pub reason: String,
}

/// Violated when a present numeric `field` falls outside `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRestriction {
    pub field: ConfigField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    pub reason: String,
}

/// Non-fatal advice.
///
/// With no `values`, fires when `field` is set (a checked flag). Otherwise
/// fires when `field` holds one of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRule {
    pub field: ConfigField,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub message: String,
}

/// All rules keyed by one location or style value, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRules {
    pub key: String,
    pub rules: Vec<Rule>,
}

impl KeyedRules {
    pub fn incompatibilities(&self) -> impl Iterator<Item = &IncompatibilityRule> {
        self.rules.iter().filter_map(|r| match r {
            Rule::Incompatibility(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn ranges(&self) -> impl Iterator<Item = &RangeRestriction> {
        self.rules.iter().filter_map(|r| match r {
            Rule::Range(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &WarningRule> {
        self.rules.iter().filter_map(|r| match r {
            Rule::Warning(rule) => Some(rule),
            _ => None,
        })
    }
}

/// A priced amenity that carries its own placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Pool,
    Garage,
    Deck,
    Fireplace,
}

impl Amenity {
    /// The boolean field that selects this amenity.
    pub fn field(self) -> ConfigField {
        match self {
            Self::Pool => ConfigField::HasPool,
            Self::Garage => ConfigField::HasGarage,
            Self::Deck => ConfigField::HasDeck,
            Self::Fireplace => ConfigField::HasFireplace,
        }
    }

    pub fn is_selected(self, config: &HouseConfiguration) -> bool {
        config.value(self.field()).is_set()
    }
}

/// Cross-check between a selected amenity and another field.
///
/// A value in `impossible` is an error on the amenity's field; a value in
/// `warning` is a warning on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityRule {
    pub amenity: Amenity,
    pub field: ConfigField,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impossible: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warning: Vec<String>,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Which half of the table a [`KeyedRules`] entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Location,
    Style,
}

impl Dimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Style => "style",
        }
    }
}

/// The validated, read-only rule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    location: Vec<KeyedRules>,
    style: Vec<KeyedRules>,
    amenities: Vec<AmenityRule>,
}

/// Unvalidated rule table as read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleTableDocument {
    #[serde(default)]
    pub location: Vec<KeyedRules>,
    #[serde(default)]
    pub style: Vec<KeyedRules>,
    #[serde(default)]
    pub amenities: Vec<AmenityRule>,
}

/// A rule value that is not a key of the catalog category it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingValue {
    pub owner: String,
    pub field: ConfigField,
    pub value: String,
}

impl RuleTable {
    /// Validate a parsed document into a rule table.
    ///
    /// Rejects duplicate location/style keys and ranges whose `min` exceeds
    /// their `max`.
    pub fn new(doc: RuleTableDocument) -> Result<Self, ConfigError> {
        check_keys(Dimension::Location, &doc.location)?;
        check_keys(Dimension::Style, &doc.style)?;
        Ok(Self {
            location: doc.location,
            style: doc.style,
            amenities: doc.amenities,
        })
    }

    /// Parse and validate a JSON rule table.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: RuleTableDocument =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: "<rules>".to_string(),
                source,
            })?;
        Self::new(doc)
    }

    /// Load a JSON rule table from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let doc: RuleTableDocument =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        Self::new(doc)
    }

    /// Rules for `key` in the given dimension, if any are declared.
    pub fn rules_for(&self, dimension: Dimension, key: &str) -> Option<&KeyedRules> {
        let entries = match dimension {
            Dimension::Location => &self.location,
            Dimension::Style => &self.style,
        };
        entries.iter().find(|e| e.key == key)
    }

    pub fn entries(&self, dimension: Dimension) -> &[KeyedRules] {
        match dimension {
            Dimension::Location => &self.location,
            Dimension::Style => &self.style,
        }
    }

    pub fn amenities(&self) -> &[AmenityRule] {
        &self.amenities
    }

    /// Rule values that the catalog does not offer for the referenced field.
    ///
    /// These never match a priced selection. Not an error, but worth
    /// reporting when a custom table is loaded.
    pub fn dangling_values(&self, catalog: &Catalog) -> Vec<DanglingValue> {
        let mut out = Vec::new();
        let mut check = |owner: String, field: ConfigField, values: &[String]| {
            if let Some(category) = field.category() {
                for value in values {
                    if !catalog.contains(category, value) {
                        out.push(DanglingValue {
                            owner: owner.clone(),
                            field,
                            value: value.clone(),
                        });
                    }
                }
            }
        };

        for dimension in [Dimension::Location, Dimension::Style] {
            for entry in self.entries(dimension) {
                let owner = format!("{} '{}'", dimension.as_str(), entry.key);
                for rule in entry.incompatibilities() {
                    check(owner.clone(), rule.field, &rule.values);
                }
                for rule in entry.warnings() {
                    check(owner.clone(), rule.field, &rule.values);
                }
            }
        }
        for rule in &self.amenities {
            let owner = format!("amenity '{}'", rule.amenity.field());
            check(owner.clone(), rule.field, &rule.impossible);
            check(owner, rule.field, &rule.warning);
        }
        out
    }
}

fn check_keys(dimension: Dimension, entries: &[KeyedRules]) -> Result<(), ConfigError> {
    let table = format!("{} rules", dimension.as_str());
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.key.as_str()) {
            return Err(ConfigError::DuplicateKey {
                table,
                key: entry.key.clone(),
            });
        }
        for range in entry.ranges() {
            if let (Some(min), Some(max)) = (range.min, range.max) {
                if min > max {
                    return Err(ConfigError::InvertedRange {
                        table,
                        key: entry.key.clone(),
                        field: range.field.to_string(),
                        min,
                        max,
                    });
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Aggregated verdict for one configuration.
///
/// Errors and warnings appear in rule evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
    pub warnings: Vec<FieldViolation>,
}

impl ValidationResult {
    /// Fields with at least one error, in order of first appearance.
    pub fn error_fields(&self) -> Vec<ConfigField> {
        let mut fields = Vec::new();
        for violation in &self.errors {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: ConfigField,
    pub message: String,
}
