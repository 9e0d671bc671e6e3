use serde::Serialize;
use serde_json::{json, Value};

use crate::food::model::{Nutrient, ProductRecord};

pub const CHART_NUTRIENTS: [Nutrient; 5] = [
    Nutrient::Sugars,
    Nutrient::Fat,
    Nutrient::Carbohydrates,
    Nutrient::Proteins,
    Nutrient::Salt,
];
pub const CHART_LABELS: [&str; 5] = ["Sugars", "Fat", "Carbs", "Protein", "Salt"];
pub const CHART_COLORS: [&str; 5] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: [&'static str; 5],
    pub values: [f64; 5],
    pub colors: [&'static str; 5],
}

impl ChartData {
    pub fn from_product(product: &ProductRecord) -> Self {
        Self {
            labels: CHART_LABELS,
            values: CHART_NUTRIENTS.map(|nutrient| product.nutrient_or_zero(nutrient)),
            colors: CHART_COLORS,
        }
    }

    /// Chart.js pie configuration.
    pub fn pie_config(&self) -> Value {
        json!({
            "type": "pie",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "data": self.values,
                    "backgroundColor": self.colors,
                }]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_five_values_in_order() {
        let mut product = ProductRecord::default();
        assert_eq!(ChartData::from_product(&product).values, [0.0; 5]);

        product.nutrients.insert(Nutrient::Salt, 0.1);
        product.nutrients.insert(Nutrient::Sugars, 56.3);
        product.nutrients.insert(Nutrient::Energy, 539.0);
        let chart = ChartData::from_product(&product);
        assert_eq!(chart.values, [56.3, 0.0, 0.0, 0.0, 0.1]);
    }

    #[test]
    fn test_pie_config_shape() {
        let config = ChartData::from_product(&ProductRecord::default()).pie_config();
        assert_eq!(config["type"], "pie");
        assert_eq!(config["data"]["labels"][2], "Carbs");
        assert_eq!(config["data"]["datasets"][0]["data"].as_array().unwrap().len(), 5);
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"][0], "#FF6384");
    }
}
