//! Shared types, models and alert calculators for the StockFlow inventory platform
//!
//! This crate contains everything that does not touch storage or HTTP, so the
//! backend and its tests can share one definition of the business rules.

pub mod alerts;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
