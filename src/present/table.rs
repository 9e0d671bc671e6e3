use colored::Colorize;
use serde::Serialize;

use super::escape_html;
use crate::food::model::{Nutrient, ProductRecord, ScoreResult};

pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

/// Fixed-row nutrition table: seven nutrients, then CO2 and eco-points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionTable {
    pub rows: Vec<TableRow>,
}

impl NutritionTable {
    pub fn build(product: &ProductRecord, score: &ScoreResult) -> Self {
        let mut rows: Vec<TableRow> = Nutrient::ALL
            .iter()
            .map(|nutrient| TableRow {
                label: nutrient.to_string(),
                value: format_amount(product.nutrient(*nutrient), nutrient.unit()),
            })
            .collect();

        rows.push(TableRow {
            label: "CO₂ Emission".to_string(),
            value: format!("{} kg / 100g", score.co2_estimate),
        });
        rows.push(TableRow {
            label: "Eco-Points Earned".to_string(),
            value: score.eco_points.to_string(),
        });

        Self { rows }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table>\n  <tr><th>Nutrient</th><th>Amount / 100g</th></tr>\n");
        for row in &self.rows {
            html.push_str(&format!(
                "  <tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        html.push_str("</table>");
        html
    }

    pub fn render_terminal(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = format!("{}\n", "Nutrient / Amount per 100g".bold());
        for row in &self.rows {
            let padding = " ".repeat(width - row.label.chars().count());
            let value = if row.value.starts_with(PLACEHOLDER) {
                row.value.dimmed()
            } else {
                row.value.cyan()
            };
            out.push_str(&format!("  {}{}  {}\n", row.label, padding, value));
        }
        out
    }
}

pub fn format_amount(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => format!("{} {}", PLACEHOLDER, unit),
    }
}
