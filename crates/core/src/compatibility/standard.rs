//! The built-in rule table.

use super::rules::{
    Amenity, AmenityRule, IncompatibilityRule, KeyedRules, RangeRestriction, Rule, RuleTable,
    RuleTableDocument, WarningRule,
};
use crate::configuration::ConfigField;
use crate::error::ConfigError;

impl RuleTable {
    /// The rules shipped with the configurator.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(standard_document())
    }
}

fn standard_document() -> RuleTableDocument {
    RuleTableDocument {
        location: vec![
            keyed(
                "Desert",
                vec![
                    incompatible(
                        ConfigField::LandscapeType,
                        &["Lush Garden", "Tropical", "English Garden"],
                        "Desert locations cannot support water-intensive landscaping",
                    ),
                    flag_warning(
                        ConfigField::HasPool,
                        "Pools in desert locations require expensive water management",
                    ),
                ],
            ),
            keyed(
                "NYC",
                vec![
                    incompatible(
                        ConfigField::Style,
                        &["Ranch", "Farmhouse"],
                        "Ranch and Farmhouse styles are not suitable for NYC urban environment",
                    ),
                    range(
                        ConfigField::SquareFeet,
                        None,
                        Some(3000),
                        "NYC properties are typically smaller",
                    ),
                ],
            ),
            keyed(
                "Mountains",
                vec![incompatible(
                    ConfigField::RoofType,
                    &["Flat"],
                    "Flat roofs are problematic in snowy mountain regions",
                )],
            ),
            keyed(
                "Oceanfront",
                vec![value_warning(
                    ConfigField::ExteriorColor,
                    &["Red", "Brown"],
                    "Dark colors fade quickly in coastal sun exposure",
                )],
            ),
        ],
        style: vec![
            keyed(
                "Modern",
                vec![
                    incompatible(
                        ConfigField::RoofType,
                        &["Gambrel", "Mansard"],
                        "Traditional elements conflict with modern aesthetic",
                    ),
                    incompatible(
                        ConfigField::KitchenStyle,
                        &["Rustic", "Farmhouse"],
                        "Traditional elements conflict with modern aesthetic",
                    ),
                ],
            ),
            keyed(
                "Victorian",
                vec![
                    incompatible(
                        ConfigField::RoofType,
                        &["Flat", "Shed"],
                        "Victorian homes require ornate features and bold colors",
                    ),
                    incompatible(
                        ConfigField::ExteriorColor,
                        &["White"],
                        "Victorian homes require ornate features and bold colors",
                    ),
                ],
            ),
            keyed(
                "Ranch",
                vec![
                    incompatible(
                        ConfigField::Location,
                        &["NYC"],
                        "Ranch style requires horizontal space not available in NYC",
                    ),
                    range(
                        ConfigField::Bedrooms,
                        Some(2),
                        Some(4),
                        "Ranch homes typically have 2-4 bedrooms",
                    ),
                ],
            ),
        ],
        amenities: vec![
            AmenityRule {
                amenity: Amenity::Pool,
                field: ConfigField::Location,
                impossible: strings(&["Mountains"]),
                warning: Vec::new(),
                reason: "Pools are not practical in mountain locations due to climate and \
                         maintenance costs"
                    .to_string(),
            },
            AmenityRule {
                amenity: Amenity::Pool,
                field: ConfigField::LandscapeType,
                impossible: Vec::new(),
                warning: strings(&["Desert"]),
                reason: "Pool with desert landscaping requires significant water management"
                    .to_string(),
            },
        ],
    }
}

fn keyed(key: &str, rules: Vec<Rule>) -> KeyedRules {
    KeyedRules {
        key: key.to_string(),
        rules,
    }
}

fn incompatible(field: ConfigField, values: &[&str], reason: &str) -> Rule {
    Rule::Incompatibility(IncompatibilityRule {
        field,
        values: strings(values),
        reason: reason.to_string(),
    })
}

fn range(field: ConfigField, min: Option<i64>, max: Option<i64>, reason: &str) -> Rule {
    Rule::Range(RangeRestriction {
        field,
        min,
        max,
        reason: reason.to_string(),
    })
}

fn flag_warning(field: ConfigField, message: &str) -> Rule {
    Rule::Warning(WarningRule {
        field,
        values: Vec::new(),
        message: message.to_string(),
    })
}

fn value_warning(field: ConfigField, values: &[&str], message: &str) -> Rule {
    Rule::Warning(WarningRule {
        field,
        values: strings(values),
        message: message.to_string(),
    })
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::compatibility::Dimension;

    #[test]
    fn standard_table_is_well_formed() {
        let table = RuleTable::standard().unwrap();
        assert_eq!(table.entries(Dimension::Location).len(), 4);
        assert_eq!(table.entries(Dimension::Style).len(), 3);
        assert_eq!(table.amenities().len(), 2);
    }

    #[test]
    fn only_farmhouse_style_dangles_against_the_standard_catalog() {
        let table = RuleTable::standard().unwrap();
        let dangling = table.dangling_values(&Catalog::standard().unwrap());
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].field, ConfigField::Style);
        assert_eq!(dangling[0].value, "Farmhouse");
    }

    #[test]
    fn standard_table_survives_a_json_round_trip() {
        let table = RuleTable::standard().unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(RuleTable::from_json(&json).unwrap(), table);
    }
}
