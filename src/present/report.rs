//! Static HTML results page.
//!
//! The page is written to disk and opened in the browser with the barcode in
//! the query string; Chart.js draws the pie on the client.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::{escape_html, ProductView};

pub const RESULTS_FILE: &str = "results.html";
const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

pub fn render_results_page(view: &ProductView) -> String {
    let image = view
        .image_url
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(src),
                escape_html(&view.name)
            )
        })
        .unwrap_or_default();

    // keep the JSON from closing the script element early
    let chart_config = view.chart.pie_config().to_string().replace("</", "<\\/");

    let body = format!(
        "<div class=\"left\">\n<h3>{name}</h3>\n{image}\n<p>Barcode: {barcode}</p>\n</div>\n\
         <div class=\"table-box\">\n<h3>Nutrition Table</h3>\n{table}\n</div>\n\
         <div class=\"chart-box\"><canvas id=\"nutritionChart\"></canvas></div>\n\
         <script src=\"{chart_js}\"></script>\n\
         <script>\nnew Chart(document.getElementById('nutritionChart').getContext('2d'), {config});\n</script>",
        name = escape_html(&view.name),
        image = image,
        barcode = escape_html(&view.barcode),
        table = view.table.to_html(),
        chart_js = CHART_JS_URL,
        config = chart_config,
    );

    page(&view.name, &body)
}

/// Error view: the product panel is replaced entirely.
pub fn render_error_page(message: &str) -> String {
    let body = format!(
        "<div class=\"left\">\n<h3>Product not found</h3>\n<p>{}</p>\n</div>",
        escape_html(message)
    );
    page("Product not found", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - eco-scan</title>\n</head>\n<body>\n{body}\n\
         <footer>Generated {generated}</footer>\n</body>\n</html>\n",
        title = escape_html(title),
        body = body,
        generated = Local::now().format("%Y-%m-%d %H:%M"),
    )
}

pub fn write_page(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(RESULTS_FILE);
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote results page to {}", path.display());
    Ok(path)
}

/// `file://` URL of the results page carrying the barcode as `?barcode=`.
pub fn results_url(path: &Path, barcode: Option<&str>) -> Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut url = Url::from_file_path(&absolute)
        .map_err(|_| anyhow!("Cannot build a file URL for {}", absolute.display()))?;
    if let Some(code) = barcode {
        url.query_pairs_mut().append_pair("barcode", code);
    }
    Ok(url)
}

pub fn open_in_browser(url: &Url) -> Result<()> {
    info!("Opening {}", url);
    webbrowser::open(url.as_str()).with_context(|| format!("Failed to open browser for {}", url))
}
