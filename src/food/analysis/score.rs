//! CO2 and eco-points derivation.
//!
//! Pure functions over a [`ProductRecord`]. Every priority order lives in one
//! of the tables below and is walked top to bottom; the first entry that
//! applies wins.

use crate::food::model::{Nutrient, ProductRecord, ScoreResult};

/// Category keywords and the CO2 figure (kg CO2e / 100g) they imply.
pub const CATEGORY_RULES: &[(&[&str], f64)] = &[
    (&["meat"], 2.5),
    (&["cheese", "dairy"], 1.2),
    (&["fish"], 1.5),
    (&["vegetable", "fruit"], 0.05),
];

/// Upper bounds (exclusive) of the CO2 tiers and their bonus.
pub const CO2_TIERS: &[(f64, i32)] = &[(0.1, 20), (0.5, 10), (1.0, 6)];
pub const CO2_TIER_FALLBACK: i32 = 2;

pub const GRADE_BONUSES: &[(&str, i32)] = &[("a", 10), ("b", 6), ("c", 2)];
pub const DEFAULT_GRADE: &str = "z";

pub const BASE_ECO_POINTS: i32 = 5;

const BASELINE_CO2: f64 = 0.08;
const PROTEIN_FACTOR: f64 = 0.02;
const FAT_FACTOR: f64 = 0.03;

pub fn derive_score(product: &ProductRecord) -> ScoreResult {
    let co2_estimate = co2_estimate(product);
    let eco_points = eco_points(co2_estimate, product.nutrition_grade.as_deref());
    ScoreResult {
        co2_estimate,
        eco_points,
    }
}

pub fn co2_estimate(product: &ProductRecord) -> f64 {
    if let Some(declared) = product.declared_co2 {
        return declared;
    }

    category_co2(&product.categories).unwrap_or_else(|| nutrient_co2(product))
}

/// First rule in [`CATEGORY_RULES`] with a keyword found in any tag.
pub fn category_co2(categories: &[String]) -> Option<f64> {
    let tags: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();

    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|keyword| tags.iter().any(|tag| tag.contains(keyword)))
        })
        .map(|(_, co2)| *co2)
}

pub fn nutrient_co2(product: &ProductRecord) -> f64 {
    let protein = product.nutrient_or_zero(Nutrient::Proteins);
    let fat = product.nutrient_or_zero(Nutrient::Fat);
    round2(BASELINE_CO2 + protein * PROTEIN_FACTOR + fat * FAT_FACTOR)
}

pub fn co2_tier_bonus(co2: f64) -> i32 {
    CO2_TIERS
        .iter()
        .find(|(limit, _)| co2 < *limit)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(CO2_TIER_FALLBACK)
}

pub fn grade_bonus(grade: Option<&str>) -> i32 {
    let grade = grade.unwrap_or(DEFAULT_GRADE).trim().to_lowercase();
    GRADE_BONUSES
        .iter()
        .find(|(letter, _)| *letter == grade)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

pub fn eco_points(co2: f64, grade: Option<&str>) -> i32 {
    BASE_ECO_POINTS + co2_tier_bonus(co2) + grade_bonus(grade)
}

// Rounds the exact binary value, not the value scaled by 100.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
