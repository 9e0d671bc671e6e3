pub mod chart;
pub mod report;
pub mod table;

use serde::Serialize;

use crate::food::model::{ProductRecord, ScoreResult};

pub use chart::ChartData;
pub use table::NutritionTable;

/// Everything the result view needs for one product. Building it never fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub barcode: String,
    pub name: String,
    pub image_url: Option<String>,
    pub score: ScoreResult,
    pub table: NutritionTable,
    pub chart: ChartData,
}

pub fn present(product: &ProductRecord, score: &ScoreResult) -> ProductView {
    ProductView {
        barcode: product.barcode.clone(),
        name: product.name.clone(),
        image_url: product.image_url.clone(),
        score: *score,
        table: NutritionTable::build(product, score),
        chart: ChartData::from_product(product),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
