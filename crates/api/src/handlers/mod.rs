//! Request handlers, one module per resource.

pub mod auth;
pub mod configurator;
pub mod houses;
