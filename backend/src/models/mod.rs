//! Domain models for the StockFlow inventory platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
