use crate::catalog::CatalogConfig;
use crate::llm::LlmConfig;
use crate::printify::PrintifyConfig;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BLUEPRINTS: &str = "50,1000,10,194,116";
const DEFAULT_DELAY_MS: f64 = 12.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: `{value}`")]
    Invalid { var: &'static str, value: String },
}

/// Everything a run needs, resolved once at startup and handed to each
/// component explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub printify: PrintifyConfig,
    pub llm: LlmConfig,
    /// Blueprint ids tried in order for every object.
    pub blueprints: Vec<u32>,
    /// Minimum pause before each object-detail request.
    pub detail_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog = CatalogConfig {
            base_url: env_or("CATALOG_BASE_URL", "https://example.com/api"),
            search_query: env_or("CATALOG_SEARCH_QUERY", "paintings"),
        };

        let printify = PrintifyConfig {
            api_base: env_or("PRINTIFY_API_BASE", "https://api.printify.com"),
            api_key: require("PRINTIFY_API_KEY")?,
            shop_id: require("PRINTIFY_SHOP_ID")?,
            print_provider_id: parse_var("PRINTIFY_PRINT_PROVIDER", 2)?,
        };

        let blueprints_raw = env_or("PRINTIFY_BLUEPRINTS", DEFAULT_BLUEPRINTS);
        let blueprints =
            parse_blueprints(&blueprints_raw).ok_or_else(|| ConfigError::Invalid {
                var: "PRINTIFY_BLUEPRINTS",
                value: blueprints_raw.clone(),
            })?;

        let delay_ms = parse_var("RATE_LIMIT_DELAY_MS", DEFAULT_DELAY_MS)?;
        if delay_ms < 0.0 {
            return Err(ConfigError::Invalid {
                var: "RATE_LIMIT_DELAY_MS",
                value: delay_ms.to_string(),
            });
        }

        Ok(Self {
            catalog,
            printify,
            llm: LlmConfig::from_env(),
            blueprints,
            detail_delay: Duration::from_secs_f64(delay_ms / 1000.0),
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Parses a comma-separated blueprint list, rejecting empty lists and
/// non-numeric entries.
pub fn parse_blueprints(raw: &str) -> Option<Vec<u32>> {
    let ids = raw
        .split(',')
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    if ids.is_empty() { None } else { Some(ids) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_blueprint_list_in_order() {
        let ids = parse_blueprints(DEFAULT_BLUEPRINTS).expect("default list");
        assert_eq!(ids, vec![50, 1000, 10, 194, 116]);
    }

    #[test]
    fn tolerates_spaces_and_trailing_commas() {
        assert_eq!(parse_blueprints(" 5, 6 ,7,"), Some(vec![5, 6, 7]));
    }

    #[test]
    fn rejects_non_numeric_and_empty_lists() {
        assert!(parse_blueprints("5,poster").is_none());
        assert!(parse_blueprints("").is_none());
        assert!(parse_blueprints(" , ,").is_none());
    }
}
