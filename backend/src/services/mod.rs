//! Business logic services for the StockFlow inventory platform

pub mod alert;
pub mod product;

pub use alert::AlertService;
pub use product::ProductService;
