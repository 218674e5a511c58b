//! Options to hide from the picker for the current location and style.

use indexmap::IndexSet;
use serde::Serialize;

use super::rules::{Dimension, RuleTable};
use crate::catalog::Catalog;
use crate::configuration::{ConfigField, HouseConfiguration};

/// Disallowed values per UI category, in rule declaration order.
///
/// Every category is always present, empty when nothing is suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisabledOptions {
    pub landscape_type: IndexSet<String>,
    pub roof_type: IndexSet<String>,
    pub style: IndexSet<String>,
    pub exterior_color: IndexSet<String>,
    pub kitchen_style: IndexSet<String>,
}

impl DisabledOptions {
    fn slot(&mut self, field: ConfigField) -> Option<&mut IndexSet<String>> {
        match field {
            ConfigField::LandscapeType => Some(&mut self.landscape_type),
            ConfigField::RoofType => Some(&mut self.roof_type),
            ConfigField::Style => Some(&mut self.style),
            ConfigField::ExteriorColor => Some(&mut self.exterior_color),
            ConfigField::KitchenStyle => Some(&mut self.kitchen_style),
            _ => None,
        }
    }

    /// Whether `value` is suppressed for `field`.
    pub fn contains(&self, field: ConfigField, value: &str) -> bool {
        let set = match field {
            ConfigField::LandscapeType => &self.landscape_type,
            ConfigField::RoofType => &self.roof_type,
            ConfigField::Style => &self.style,
            ConfigField::ExteriorColor => &self.exterior_color,
            ConfigField::KitchenStyle => &self.kitchen_style,
            _ => return false,
        };
        set.contains(value)
    }
}

/// Values that would make `config` invalid if chosen next.
///
/// Only location and style are read. Each incompatibility declared for the
/// selected location, then for the selected style, suppresses its values in
/// the matching category. Values the catalog does not offer in that category
/// are skipped, since the picker never shows them.
pub fn disabled_options(
    config: &HouseConfiguration,
    rules: &RuleTable,
    catalog: &Catalog,
) -> DisabledOptions {
    let mut disabled = DisabledOptions::default();

    for (dimension, key) in [
        (Dimension::Location, config.location.as_deref()),
        (Dimension::Style, config.style.as_deref()),
    ] {
        let Some(entry) = key.and_then(|k| rules.rules_for(dimension, k)) else {
            continue;
        };
        for rule in entry.incompatibilities() {
            let Some(category) = rule.field.category() else {
                continue;
            };
            let Some(slot) = disabled.slot(rule.field) else {
                continue;
            };
            slot.extend(
                rule.values
                    .iter()
                    .filter(|v| catalog.contains(category, v))
                    .cloned(),
            );
        }
    }

    disabled
}
