pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;

pub use error::{FoodError, FoodResult};
pub use lookup::{ProductLookup, ProductQuery};
pub use model::{Nutrient, ProductRecord, ScoreResult};
