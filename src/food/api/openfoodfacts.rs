use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeMap;

use super::traits::ProductSource;
use crate::food::config::FoodConfig;
use crate::food::error::{FoodError, FoodResult};
use crate::food::model::{Nutrient, ProductRecord, UNKNOWN_PRODUCT};

/// Locations of a directly declared CO2 figure, highest priority first.
pub const DECLARED_CO2_POINTERS: &[&str] = &[
    "/ecoscore_data/agribalyse/co2",
    "/agribalyse/co2",
    "/co2_100g",
];

const GRADE_FIELDS: &[&str] = &["nutrition_grade_fr", "nutrition_grades"];
const IMAGE_FIELDS: &[&str] = &["image_front_url", "image_url"];

#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: String,
    search_page_size: u32,
}

impl OpenFoodFactsClient {
    pub fn new(config: FoodConfig) -> FoodResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            search_page_size: config.search_page_size,
        })
    }

    pub fn product_url(&self, barcode: &str) -> String {
        format!(
            "{}/api/v0/product/{}.json",
            self.base_url,
            urlencoding::encode(barcode)
        )
    }

    pub fn search_url(&self) -> String {
        format!("{}/cgi/search.pl", self.base_url)
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsClient {
    async fn product_by_barcode(&self, barcode: &str) -> FoodResult<ProductRecord> {
        let url = self.product_url(barcode);
        info!("Fetching product {}", barcode);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FoodError::NotFound(format!("Product not found: {}", barcode)));
        }
        if !status.is_success() {
            warn!("Product lookup for {} failed with status {}", barcode, status);
            return Err(FoodError::Upstream(status));
        }

        let body = response.text().await?;
        parse_product_envelope(barcode, &body)
    }

    async fn search_first_barcode(&self, name: &str) -> FoodResult<String> {
        info!("Searching products for '{}'", name);
        let page_size = self.search_page_size.to_string();

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("search_terms", name),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Product search for '{}' failed with status {}", name, status);
            return Err(FoodError::Upstream(status));
        }

        let body = response.text().await?;
        parse_search_results(name, &body)
    }
}

/// Decode a `/api/v0/product/<code>.json` body into a record.
pub fn parse_product_envelope(barcode: &str, body: &str) -> FoodResult<ProductRecord> {
    let data: Value = serde_json::from_str(body)?;

    let product = data
        .get("product")
        .filter(|p| p.is_object())
        .ok_or_else(|| FoodError::NotFound(format!("Product not found: {}", barcode)))?;

    let record = product_record(barcode, product);
    debug!("Decoded product {:?}", record);
    Ok(record)
}

/// Decode a search body and return the barcode of its first product.
pub fn parse_search_results(term: &str, body: &str) -> FoodResult<String> {
    let data: Value = serde_json::from_str(body)?;

    let first = data
        .get("products")
        .and_then(|p| p.as_array())
        .and_then(|products| products.first())
        .ok_or_else(|| FoodError::NotFound(format!("No products found for '{}'", term)))?;

    first
        .get("code")
        .and_then(as_text)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            FoodError::NotFound(format!("First search result for '{}' has no barcode", term))
        })
}

pub fn product_record(barcode: &str, product: &Value) -> ProductRecord {
    let barcode = product
        .get("code")
        .and_then(as_text)
        .filter(|code| !code.trim().is_empty())
        .unwrap_or_else(|| barcode.to_string());

    let name = product
        .get("product_name")
        .and_then(|n| n.as_str())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_PRODUCT)
        .to_string();

    let mut nutrients = BTreeMap::new();
    if let Some(nutriments) = product.get("nutriments") {
        for nutrient in Nutrient::ALL {
            if let Some(value) = nutriments.get(nutrient.key()).and_then(as_number) {
                nutrients.insert(nutrient, value);
            }
        }
    }

    ProductRecord {
        barcode,
        name,
        nutrients,
        categories: categories(product),
        declared_co2: declared_co2(product),
        nutrition_grade: first_text(product, GRADE_FIELDS),
        image_url: first_text(product, IMAGE_FIELDS),
    }
}

/// First declared CO2 figure. A numeric zero or an empty string counts as
/// not declared; a non-empty string is used if it parses, so `"0"` gives 0.
/// Strings that do not parse are skipped.
pub fn declared_co2(product: &Value) -> Option<f64> {
    DECLARED_CO2_POINTERS
        .iter()
        .filter_map(|pointer| product.pointer(pointer))
        .find_map(|value| match value {
            Value::Number(_) => as_number(value).filter(|co2| *co2 != 0.0),
            Value::String(s) if !s.is_empty() => as_number(value),
            _ => None,
        })
}

fn categories(product: &Value) -> Vec<String> {
    match product.get("categories") {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|c| c.as_str())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn first_text(product: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        product
            .get(*field)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}

// The database mixes numbers and numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const NUTELLA: &str = r#"{
        "code": "3017620422003",
        "status": 1,
        "product": {
            "code": "3017620422003",
            "product_name": "Nutella",
            "categories": "Spreads, Sweet spreads, Hazelnut spreads, Cocoa and hazelnuts spreads",
            "nutrition_grades": "e",
            "image_front_url": "https://images.openfoodfacts.org/nutella.jpg",
            "nutriments": {
                "energy-kcal_100g": 539,
                "fat_100g": 30.9,
                "saturated-fat_100g": 10.6,
                "carbohydrates_100g": 57.5,
                "sugars_100g": 56.3,
                "proteins_100g": "6.3",
                "salt_100g": 0.107
            },
            "ecoscore_data": { "agribalyse": { "co2": 0 } },
            "agribalyse": { "co2": "0.84" },
            "co2_100g": 1.9
        }
    }"#;

    #[test]
    fn test_parse_full_product() {
        let record = parse_product_envelope("3017620422003", NUTELLA).unwrap();
        assert_eq!(record.name, "Nutella");
        assert_eq!(record.barcode, "3017620422003");
        assert_eq!(record.categories.len(), 4);
        assert_eq!(record.categories[0], "Spreads");
        assert_eq!(record.nutrient(Nutrient::Energy), Some(539.0));
        assert_eq!(record.nutrient(Nutrient::Proteins), Some(6.3));
        assert_eq!(record.nutrition_grade.as_deref(), Some("e"));
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://images.openfoodfacts.org/nutella.jpg")
        );
        // ecoscore figure is zero, so the agribalyse one is used
        assert_eq!(record.declared_co2, Some(0.84));
    }

    #[test]
    fn test_missing_product_is_not_found() {
        let body = r#"{"code":"000","status":0,"status_verbose":"product not found"}"#;
        let err = parse_product_envelope("000", body).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("000"));
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        let err = parse_product_envelope("123", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, FoodError::MalformedResponse(_)));
    }

    #[test]
    fn test_sparse_product_defaults() {
        let record = product_record("42", &json!({ "nutriments": { "fat_100g": "n/a" } }));
        assert_eq!(record.barcode, "42");
        assert_eq!(record.name, UNKNOWN_PRODUCT);
        assert!(record.nutrients.is_empty());
        assert!(record.categories.is_empty());
        assert_eq!(record.declared_co2, None);
        assert_eq!(record.nutrition_grade, None);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_declared_co2_priority() {
        let all = json!({
            "ecoscore_data": { "agribalyse": { "co2": 0.3 } },
            "agribalyse": { "co2": 0.4 },
            "co2_100g": 0.5
        });
        assert_eq!(declared_co2(&all), Some(0.3));

        let last_only = json!({ "agribalyse": { "co2": "abc" }, "co2_100g": "0.5" });
        assert_eq!(declared_co2(&last_only), Some(0.5));

        assert_eq!(declared_co2(&json!({})), None);
    }

    #[test]
    fn test_declared_co2_zero_handling() {
        let zero_number = json!({
            "ecoscore_data": { "agribalyse": { "co2": 0 } },
            "co2_100g": 0.7
        });
        assert_eq!(declared_co2(&zero_number), Some(0.7));

        let zero_string = json!({
            "ecoscore_data": { "agribalyse": { "co2": "0" } },
            "co2_100g": 0.7
        });
        assert_eq!(declared_co2(&zero_string), Some(0.0));

        let empty_string = json!({ "agribalyse": { "co2": "" }, "co2_100g": 0.7 });
        assert_eq!(declared_co2(&empty_string), Some(0.7));
    }

    #[test]
    fn test_grade_field_fallback() {
        let record = product_record(
            "1",
            &json!({ "nutrition_grade_fr": "", "nutrition_grades": "b" }),
        );
        assert_eq!(record.nutrition_grade.as_deref(), Some("b"));
    }

    #[test]
    fn test_search_takes_first_code() {
        let body = r#"{"count":2,"products":[{"code":"111"},{"code":"222"}]}"#;
        assert_eq!(parse_search_results("milk", body).unwrap(), "111");
    }

    #[test]
    fn test_empty_search_mentions_term() {
        let body = r#"{"count":0,"products":[]}"#;
        let err = parse_search_results("unicorn steak", body).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("unicorn steak"));
    }

    #[test]
    fn test_search_result_without_code() {
        let body = r#"{"products":[{"product_name":"Mystery"}]}"#;
        assert!(parse_search_results("mystery", body).unwrap_err().is_not_found());
    }

    #[test]
    fn test_product_url_encodes_barcode() {
        let client = OpenFoodFactsClient::new(FoodConfig::default()).unwrap();
        assert_eq!(
            client.product_url("3017620422003"),
            "https://world.openfoodfacts.org/api/v0/product/3017620422003.json"
        );
        assert!(client.product_url("a/b").contains("a%2Fb"));
    }

    /// Local server answering every request with the same status line and body.
    async fn serve(status: &'static str, body: &'static str) -> OpenFoodFactsClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        OpenFoodFactsClient::new(FoodConfig {
            base_url: format!("http://{}", addr),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_http_status_mapping() {
        let client = serve("404 Not Found", r#"{"status":0}"#).await;
        let err = client.product_by_barcode("0000").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("0000"));

        let client = serve("500 Internal Server Error", "{}").await;
        let err = client.product_by_barcode("123").await.unwrap_err();
        assert!(matches!(err, FoodError::Upstream(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
        let err = client.search_first_barcode("bread").await.unwrap_err();
        assert!(matches!(err, FoodError::Upstream(s) if s == StatusCode::INTERNAL_SERVER_ERROR));

        let client = serve("200 OK", r#"{"count":0,"products":[]}"#).await;
        let err = client.search_first_barcode("unicorn steak").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("unicorn steak"));

        let client = serve("200 OK", NUTELLA).await;
        let record = client.product_by_barcode("3017620422003").await.unwrap();
        assert_eq!(record.name, "Nutella");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenFoodFactsClient::new(FoodConfig {
            base_url: format!("http://{}", addr),
            ..Default::default()
        })
        .unwrap();
        let err = client.product_by_barcode("123").await.unwrap_err();
        assert!(matches!(err, FoodError::Network(_)));
    }
}
