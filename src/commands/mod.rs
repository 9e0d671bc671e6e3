use crate::config::AppConfig;
use crate::food::api::{OpenFoodFactsClient, ProductSource};
use crate::food::config::FoodConfig;
use crate::food::lookup::{ProductLookup, ProductQuery};

mod system;

pub mod food_cmd;

pub use food_cmd::OutputOptions;

pub struct CommandHandler<S: ProductSource = OpenFoodFactsClient> {
    lookup: ProductLookup<S>,
    config: AppConfig,
    output: OutputOptions,
}

impl CommandHandler<OpenFoodFactsClient> {
    pub fn new(
        food_config: FoodConfig,
        config: AppConfig,
        output: OutputOptions,
    ) -> Result<Self, String> {
        let client = OpenFoodFactsClient::new(food_config)
            .map_err(|e| format!("Failed to initialize product client: {}", e))?;
        Ok(Self::with_source(client, config, output))
    }
}

impl<S: ProductSource> CommandHandler<S> {
    pub fn with_source(source: S, config: AppConfig, output: OutputOptions) -> Self {
        Self {
            lookup: ProductLookup::new(source),
            config,
            output,
        }
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        match input.to_lowercase().as_str() {
            "help" | "exit" | "quit" => return system::handle_command(input),
            "scan" => return self.scan().await,
            "barcode" => return Err("Usage: barcode <code>".to_string()),
            "search" => return Err("Usage: search <name>".to_string()),
            _ => {}
        }

        if let Some(code) = strip_keyword(input, "barcode ") {
            return self.run_query(ProductQuery::Barcode(code.trim().to_string())).await;
        }

        if let Some(name) = strip_keyword(input, "search ") {
            return self.run_query(ProductQuery::Name(name.trim().to_string())).await;
        }

        // Bare input: digits are a barcode, anything else a name
        self.run_query(ProductQuery::parse(input)).await
    }

    pub async fn run_query(&self, query: ProductQuery) -> Result<(), String> {
        food_cmd::show_product(&self.lookup, &query, self.output, &self.config.report_dir)
            .await
            .map(|_| ())
    }

    pub async fn scan(&self) -> Result<(), String> {
        food_cmd::scan_and_show(
            &self.lookup,
            &self.config.scanner_devices,
            self.output,
            &self.config.report_dir,
        )
        .await
        .map(|_| ())
    }
}

/// Remainder of `input` after `keyword`, matched without regard to case.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    input
        .get(..keyword.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(keyword))
        .map(|_| &input[keyword.len()..])
}
