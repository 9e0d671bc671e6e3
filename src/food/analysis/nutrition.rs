use log::info;

use crate::food::api::ProductSource;
use crate::food::error::FoodResult;
use crate::food::lookup::{ProductLookup, ProductQuery};
use crate::present::{present, ProductView};

use super::score::derive_score;

/// Lookup, score and shape one product for display. Either the whole view
/// comes back or the error does.
pub async fn analyze_product<S: ProductSource>(
    lookup: &ProductLookup<S>,
    query: &ProductQuery,
) -> FoodResult<ProductView> {
    info!("Analyzing {}", query);

    let product = lookup.resolve(query).await?;
    let score = derive_score(&product);
    info!(
        "{} ({}): {} kg CO2e/100g, {} eco-points",
        product.name, product.barcode, score.co2_estimate, score.eco_points
    );

    Ok(present(&product, &score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::error::FoodError;
    use crate::food::model::{Nutrient, ProductRecord};
    use async_trait::async_trait;

    struct OneProduct;

    #[async_trait]
    impl ProductSource for OneProduct {
        async fn product_by_barcode(&self, barcode: &str) -> FoodResult<ProductRecord> {
            if barcode != "7622210449283" {
                return Err(FoodError::NotFound(format!("Product not found: {}", barcode)));
            }
            let mut product = ProductRecord {
                barcode: barcode.to_string(),
                name: "Crackers".to_string(),
                categories: vec!["Snacks".to_string(), "Crackers".to_string()],
                nutrition_grade: Some("c".to_string()),
                ..Default::default()
            };
            product.nutrients.insert(Nutrient::Proteins, 9.0);
            product.nutrients.insert(Nutrient::Fat, 10.0);
            Ok(product)
        }

        async fn search_first_barcode(&self, _name: &str) -> FoodResult<String> {
            Ok("7622210449283".to_string())
        }
    }

    #[tokio::test]
    async fn test_full_view() {
        let lookup = ProductLookup::new(OneProduct);
        let view = analyze_product(&lookup, &ProductQuery::Name("crackers".to_string()))
            .await
            .unwrap();
        assert_eq!(view.name, "Crackers");
        assert_eq!(view.score.co2_estimate, 0.56);
        assert_eq!(view.score.eco_points, 5 + 6 + 2);
        assert_eq!(view.chart.values, [0.0, 10.0, 0.0, 9.0, 0.0]);
    }

    #[tokio::test]
    async fn test_error_means_no_view() {
        let lookup = ProductLookup::new(OneProduct);
        let result = analyze_product(&lookup, &ProductQuery::Barcode("1".to_string())).await;
        assert!(result.unwrap_err().is_not_found());
    }
}
