//! Row types and insert/update DTOs, one module per table.

pub mod house;
pub mod session;
pub mod user;
