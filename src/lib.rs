pub mod commands;
pub mod config;
pub mod food;
pub mod present;
pub mod scanner;

// Re-export commonly used items
pub use food::analysis::{analyze_product, derive_score};
pub use food::{FoodError, ProductLookup, ProductQuery, ProductRecord, ScoreResult};
pub use present::ProductView;
