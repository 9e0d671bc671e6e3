use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use std::path::Path;
use std::time::Duration;

use crate::food::analysis::analyze_product;
use crate::food::api::ProductSource;
use crate::food::lookup::{ProductLookup, ProductQuery};
use crate::present::report::{
    open_in_browser, render_error_page, render_results_page, results_url, write_page,
};
use crate::present::ProductView;
use crate::scanner::{device::ScanDevice, scan_barcode};

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub open: bool,
}

pub async fn show_product<S: ProductSource>(
    lookup: &ProductLookup<S>,
    query: &ProductQuery,
    output: OutputOptions,
    report_dir: &Path,
) -> Result<ProductView, String> {
    let spinner = spinner(format!("Looking up {}", query));
    let result = analyze_product(lookup, query).await;
    spinner.finish_and_clear();

    match result {
        Ok(view) => {
            if output.json {
                let json = serde_json::to_string_pretty(&view)
                    .map_err(|e| format!("Failed to serialize result: {}", e))?;
                println!("{}", json);
            } else {
                print_view(&view);
            }
            if output.open {
                publish(report_dir, &render_results_page(&view), Some(&view.barcode))?;
            }
            Ok(view)
        }
        Err(e) => {
            error!("Lookup for {} failed: {}", query, e);
            if output.open {
                publish(report_dir, &render_error_page(&e.to_string()), None)?;
            }
            Err(e.to_string())
        }
    }
}

pub async fn scan_and_show<S: ProductSource>(
    lookup: &ProductLookup<S>,
    devices: &[ScanDevice],
    output: OutputOptions,
    report_dir: &Path,
) -> Result<ProductView, String> {
    println!("📷 Scan a barcode now (one code per line)...");
    let barcode = scan_barcode(devices).await.map_err(|e| {
        error!("Scan failed: {}", e);
        format!("An error occurred: {}", e)
    })?;
    println!("✅ Scanned {}", barcode.bright_yellow());

    show_product(lookup, &ProductQuery::Barcode(barcode), output, report_dir).await
}

pub fn print_view(view: &ProductView) {
    println!("\n🛒 {}", view.name.bold().green());
    println!("   Barcode: {}", view.barcode);
    if let Some(image) = &view.image_url {
        println!("   Image: {}", image.dimmed());
    }
    println!();
    print!("{}", view.table.render_terminal());

    let slices: Vec<String> = view
        .chart
        .labels
        .iter()
        .zip(view.chart.values.iter())
        .map(|(label, value)| format!("{} {}", label, value))
        .collect();
    println!("\n🥧 {}", slices.join(" | "));
    println!(
        "🌍 {} kg CO₂e / 100g  ⭐ {} eco-points\n",
        view.score.co2_estimate.to_string().cyan(),
        view.score.eco_points.to_string().cyan()
    );
}

fn publish(report_dir: &Path, html: &str, barcode: Option<&str>) -> Result<(), String> {
    let path = write_page(report_dir, html).map_err(|e| e.to_string())?;
    let url = results_url(&path, barcode).map_err(|e| e.to_string())?;
    println!("📄 Results page: {}", url);
    open_in_browser(&url).map_err(|e| e.to_string())
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
