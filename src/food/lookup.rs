use log::info;
use std::fmt;

use crate::food::api::ProductSource;
use crate::food::error::{FoodError, FoodResult};
use crate::food::model::ProductRecord;

/// What the user gave us to identify a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    Barcode(String),
    Name(String),
}

impl ProductQuery {
    /// All-digit input is a barcode, anything else is a product name.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            ProductQuery::Barcode(input.to_string())
        } else {
            ProductQuery::Name(input.to_string())
        }
    }
}

impl fmt::Display for ProductQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductQuery::Barcode(code) => write!(f, "barcode {}", code),
            ProductQuery::Name(name) => write!(f, "'{}'", name),
        }
    }
}

pub struct ProductLookup<S: ProductSource> {
    source: S,
}

impl<S: ProductSource> ProductLookup<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, query: &ProductQuery) -> FoodResult<ProductRecord> {
        match query {
            ProductQuery::Barcode(code) => self.by_barcode(code).await,
            ProductQuery::Name(name) => self.by_name(name).await,
        }
    }

    pub async fn by_barcode(&self, barcode: &str) -> FoodResult<ProductRecord> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(FoodError::NotFound("No barcode given".to_string()));
        }
        self.source.product_by_barcode(barcode).await
    }

    pub async fn by_name(&self, name: &str) -> FoodResult<ProductRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FoodError::NotFound("No search term given".to_string()));
        }

        let barcode = self.source.search_first_barcode(name).await?;
        info!("Search '{}' resolved to barcode {}", name, barcode);
        self.source.product_by_barcode(&barcode).await
    }
}
