pub mod nutrition;
pub mod score;

pub use nutrition::analyze_product;
pub use score::derive_score;
