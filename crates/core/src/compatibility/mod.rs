//! Compatibility engine.
//!
//! A [`RuleTable`] declares, per location and per style, which other
//! selections are incompatible, which numeric fields are bounded, and which
//! combinations merely deserve a warning. Amenity rules cross-check selected
//! amenities against other fields. Two pure operations read the table:
//!
//! - [`validate`] interprets every applicable rule and reports errors and
//!   warnings in evaluation order.
//! - [`disabled_options`] replays the incompatibilities for the current
//!   location and style so the UI can hide choices before they are made.
//!
//! Every value [`disabled_options`] suppresses produces an error from
//! [`validate`] when selected alongside the same location and style.

mod disabled;
mod evaluator;
mod rules;
mod standard;

pub use disabled::{disabled_options, DisabledOptions};
pub use evaluator::validate;
pub use rules::{
    Amenity, AmenityRule, DanglingValue, Dimension, FieldViolation, IncompatibilityRule,
    KeyedRules, RangeRestriction, Rule, RuleTable, RuleTableDocument, ValidationResult,
    WarningRule,
};
