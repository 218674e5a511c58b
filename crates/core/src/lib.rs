//! Hearth core: the house configurator rules engine.
//!
//! Everything in this crate is pure logic with no I/O on the request path:
//!
//! - [`catalog`] -- the static price list for every selectable option.
//! - [`configuration`] -- the (possibly partial) house design being priced.
//! - [`pricing`] -- the price calculator.
//! - [`compatibility`] -- the rule table, the validation interpreter, and the
//!   disabled-options advisor.

pub mod catalog;
pub mod compatibility;
pub mod configuration;
pub mod error;
pub mod pricing;
pub mod types;
