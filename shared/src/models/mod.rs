//! Domain models for the StockFlow inventory platform

mod alert;
mod product;
mod sale;

pub use alert::*;
pub use product::*;
pub use sale::*;
