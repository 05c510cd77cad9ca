pub mod catalog;
pub mod products;
pub mod uploads;

pub use catalog::Variant;
pub use products::CreateProductRequest;

use crate::http::build_client;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct PrintifyConfig {
    pub api_base: String,
    pub api_key: String,
    pub shop_id: String,
    pub print_provider_id: u32,
}

/// Authenticated client for the Printify REST API. One instance is
/// shared across catalog loading, uploads, and product creation.
#[derive(Debug, Clone)]
pub struct PrintifyClient {
    http: Client,
    config: PrintifyConfig,
}

impl PrintifyClient {
    pub fn new(config: PrintifyConfig) -> Self {
        Self {
            http: build_client(),
            config,
        }
    }

    pub fn print_provider_id(&self) -> u32 {
        self.config.print_provider_id
    }

    fn api_base(&self) -> &str {
        self.config.api_base.trim_end_matches('/')
    }
}
