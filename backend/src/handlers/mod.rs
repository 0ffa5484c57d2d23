//! HTTP handlers for the StockFlow inventory platform

mod alert;
mod health;
mod product;

pub use alert::*;
pub use health::*;
pub use product::*;
