use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Per-100g nutrients tracked for a product, keyed the way the product
/// database names them in its `nutriments` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Fat,
    SaturatedFat,
    Carbohydrates,
    Sugars,
    Proteins,
    Salt,
}

impl Nutrient {
    pub const ALL: [Nutrient; 7] = [
        Nutrient::Energy,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Carbohydrates,
        Nutrient::Sugars,
        Nutrient::Proteins,
        Nutrient::Salt,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Energy => "energy-kcal_100g",
            Nutrient::Fat => "fat_100g",
            Nutrient::SaturatedFat => "saturated-fat_100g",
            Nutrient::Carbohydrates => "carbohydrates_100g",
            Nutrient::Sugars => "sugars_100g",
            Nutrient::Proteins => "proteins_100g",
            Nutrient::Salt => "salt_100g",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Nutrient::Energy => "Energy",
            Nutrient::Fat => "Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::Carbohydrates => "Carbs",
            Nutrient::Sugars => "Sugars",
            Nutrient::Proteins => "Protein",
            Nutrient::Salt => "Salt",
        };
        write!(f, "{}", label)
    }
}

/// A product as fetched from the product database. Never mutated after the
/// lookup that produced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    pub nutrients: BTreeMap<Nutrient, f64>,
    pub categories: Vec<String>,
    pub declared_co2: Option<f64>,
    pub nutrition_grade: Option<String>,
    pub image_url: Option<String>,
}

impl ProductRecord {
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<f64> {
        self.nutrients.get(&nutrient).copied()
    }

    /// Value used in numeric formulas: absent counts as zero.
    pub fn nutrient_or_zero(&self, nutrient: Nutrient) -> f64 {
        self.nutrient(nutrient).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// kg CO2-equivalent per 100g
    pub co2_estimate: f64,
    pub eco_points: i32,
}
