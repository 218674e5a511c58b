//! Validation interpreter.

use super::rules::{
    AmenityRule, Dimension, FieldViolation, KeyedRules, RangeRestriction, RuleTable,
    ValidationResult, WarningRule,
};
use crate::configuration::{FieldValue, HouseConfiguration};

/// Evaluate every applicable rule against `config`.
///
/// Location rules run first, then style rules, each in three passes
/// (incompatibilities, ranges, warnings). Amenity cross-checks run last.
/// Fields that are absent or hold unknown values trigger nothing.
pub fn validate(config: &HouseConfiguration, rules: &RuleTable) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (dimension, key) in [
        (Dimension::Location, config.location.as_deref()),
        (Dimension::Style, config.style.as_deref()),
    ] {
        if let Some(entry) = key.and_then(|k| rules.rules_for(dimension, k)) {
            evaluate_keyed(config, dimension, entry, &mut result);
        }
    }

    for rule in rules.amenities() {
        evaluate_amenity(config, rule, &mut result);
    }

    result.is_valid = result.errors.is_empty();
    result
}

fn evaluate_keyed(
    config: &HouseConfiguration,
    dimension: Dimension,
    entry: &KeyedRules,
    result: &mut ValidationResult,
) {
    let owner = format!("{} {}", entry.key, dimension.as_str());

    for rule in entry.incompatibilities() {
        if let Some(value) = config.value(rule.field).as_text() {
            if rule.values.iter().any(|v| v == value) {
                result.errors.push(FieldViolation {
                    field: rule.field,
                    message: format!("{value} is incompatible with {owner}. {}", rule.reason),
                });
            }
        }
    }

    for rule in entry.ranges() {
        if let Some(message) = range_violation(config, rule, dimension, &entry.key) {
            result.errors.push(FieldViolation {
                field: rule.field,
                message,
            });
        }
    }

    for rule in entry.warnings() {
        if let Some(message) = warning_message(config, rule, &owner) {
            result.warnings.push(FieldViolation {
                field: rule.field,
                message,
            });
        }
    }
}

fn range_violation(
    config: &HouseConfiguration,
    rule: &RangeRestriction,
    dimension: Dimension,
    key: &str,
) -> Option<String> {
    let n = config.value(rule.field).as_count()?;
    let scope = match dimension {
        Dimension::Location => key.to_string(),
        Dimension::Style => format!("{key} style"),
    };
    if rule.max.is_some_and(|max| n > max) {
        return Some(format!(
            "{} exceeds maximum for {scope}. {}",
            rule.field, rule.reason
        ));
    }
    if rule.min.is_some_and(|min| n < min) {
        return Some(format!(
            "{} below minimum for {scope}. {}",
            rule.field, rule.reason
        ));
    }
    None
}

fn warning_message(
    config: &HouseConfiguration,
    rule: &WarningRule,
    owner: &str,
) -> Option<String> {
    let current = config.value(rule.field);
    if rule.values.is_empty() {
        return current.is_set().then(|| rule.message.clone());
    }
    match current {
        FieldValue::Text(value) if rule.values.iter().any(|v| v == value) => Some(format!(
            "{value} is not recommended for {owner}. {}",
            rule.message
        )),
        _ => None,
    }
}

fn evaluate_amenity(
    config: &HouseConfiguration,
    rule: &AmenityRule,
    result: &mut ValidationResult,
) {
    if !rule.amenity.is_selected(config) {
        return;
    }
    let Some(value) = config.value(rule.field).as_text() else {
        return;
    };
    let violation = || FieldViolation {
        field: rule.amenity.field(),
        message: rule.reason.clone(),
    };
    if rule.impossible.iter().any(|v| v == value) {
        result.errors.push(violation());
    } else if rule.warning.iter().any(|v| v == value) {
        result.warnings.push(violation());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::configuration::ConfigField;

    fn check(value: serde_json::Value) -> ValidationResult {
        let config: HouseConfiguration = serde_json::from_value(value).unwrap();
        validate(&config, &RuleTable::standard().unwrap())
    }

    #[test]
    fn empty_configuration_is_valid() {
        let result = check(json!({}));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn desert_rejects_water_hungry_landscaping() {
        let result = check(json!({ "location": "Desert", "landscape_type": "Tropical" }));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, ConfigField::LandscapeType);
        assert_eq!(
            result.errors[0].message,
            "Tropical is incompatible with Desert location. \
             Desert locations cannot support water-intensive landscaping"
        );
    }

    #[test]
    fn pool_in_the_mountains_is_an_error_on_the_pool() {
        let result = check(json!({ "location": "Mountains", "has_pool": true }));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, ConfigField::HasPool);
        assert!(result.errors[0].message.starts_with("Pools are not practical"));
    }

    #[test]
    fn ranch_in_nyc_fails_both_ways() {
        let result = check(json!({ "location": "NYC", "style": "Ranch" }));
        assert!(!result.is_valid);
        assert_eq!(
            result.error_fields(),
            vec![ConfigField::Style, ConfigField::Location]
        );
        assert_eq!(
            result.errors[0].message,
            "Ranch is incompatible with NYC location. \
             Ranch and Farmhouse styles are not suitable for NYC urban environment"
        );
        assert!(result.errors[1].message.contains("with Ranch style."));
    }

    #[test]
    fn range_reports_maximum_before_minimum_and_names_style_scope() {
        let result = check(json!({ "location": "NYC", "square_feet": 3500 }));
        assert_eq!(
            result.errors[0].message,
            "square_feet exceeds maximum for NYC. NYC properties are typically smaller"
        );

        let result = check(json!({ "style": "Ranch", "bedrooms": 1 }));
        assert_eq!(
            result.errors[0].message,
            "bedrooms below minimum for Ranch style. Ranch homes typically have 2-4 bedrooms"
        );

        let result = check(json!({ "style": "Ranch", "bedrooms": 6 }));
        assert!(result.errors[0].message.starts_with("bedrooms exceeds maximum"));
    }

    #[test]
    fn range_bounds_are_inclusive_and_ignore_absent_counts() {
        assert!(check(json!({ "location": "NYC", "square_feet": 3000 })).is_valid);
        assert!(check(json!({ "style": "Ranch", "bedrooms": 2 })).is_valid);
        assert!(check(json!({ "style": "Ranch", "bedrooms": "" })).is_valid);
    }

    #[test]
    fn zero_is_checked_against_minimums() {
        let result = check(json!({ "style": "Ranch", "bedrooms": 0 }));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, ConfigField::Bedrooms);
    }

    #[test]
    fn desert_pool_warns_twice_without_failing() {
        let result = check(json!({
            "location": "Desert",
            "has_pool": true,
            "landscape_type": "Desert"
        }));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(
            result.warnings[0].message,
            "Pools in desert locations require expensive water management"
        );
        assert_eq!(result.warnings[1].field, ConfigField::HasPool);
        assert_eq!(
            result.warnings[1].message,
            "Pool with desert landscaping requires significant water management"
        );
    }

    #[test]
    fn oceanfront_warns_only_for_listed_colors() {
        let result = check(json!({ "location": "Oceanfront", "exterior_color": "Red" }));
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![FieldViolation {
                field: ConfigField::ExteriorColor,
                message: "Red is not recommended for Oceanfront location. \
                          Dark colors fade quickly in coastal sun exposure"
                    .into(),
            }]
        );

        let result = check(json!({ "location": "Oceanfront", "exterior_color": "Blue" }));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn location_rules_come_before_style_rules() {
        let result = check(json!({
            "location": "Mountains",
            "style": "Victorian",
            "roof_type": "Flat"
        }));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].message.contains("Mountains location"));
        assert!(result.errors[1].message.contains("Victorian style"));
    }

    #[test]
    fn unknown_keys_trigger_nothing() {
        let result = check(json!({
            "location": "Atlantis",
            "style": "Brutalist",
            "roof_type": "Flat",
            "has_pool": true
        }));
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn validation_is_deterministic() {
        let config = json!({ "location": "NYC", "style": "Ranch", "square_feet": 5000 });
        assert_eq!(check(config.clone()), check(config));
    }
}
