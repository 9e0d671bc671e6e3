use async_trait::async_trait;

use crate::food::error::FoodResult;
use crate::food::model::ProductRecord;

#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one product by its exact barcode.
    async fn product_by_barcode(&self, barcode: &str) -> FoodResult<ProductRecord>;

    /// Run a text search and return the barcode of the first hit.
    async fn search_first_barcode(&self, name: &str) -> FoodResult<String>;
}
