use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub search_page_size: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("eco-scan/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(15),
            search_page_size: 1,
        }
    }
}

impl FoodConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let base_url = env::var("OFF_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let user_agent = env::var("OFF_USER_AGENT").unwrap_or(defaults.user_agent);

        let timeout = match env::var("OFF_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|_| format!("OFF_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw))?,
            ),
            Err(_) => defaults.timeout,
        };

        let search_page_size = match env::var("OFF_SEARCH_PAGE_SIZE") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(format!("OFF_SEARCH_PAGE_SIZE must be a positive integer, got '{}'", raw)),
            },
            Err(_) => defaults.search_page_size,
        };

        Ok(Self {
            base_url,
            user_agent,
            timeout,
            search_page_size,
        })
    }
}
