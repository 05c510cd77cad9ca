use crate::http::build_client;
use crate::models::CatalogObject;
use crate::throttle::Throttle;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use urlencoding::encode;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub search_query: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("object search failed: {0}")]
    Search(String),
    #[error("failed to fetch details for object {id}: {reason}")]
    Object { id: u64, reason: String },
}

/// Read-only client for the art catalog API. Detail fetches go through
/// the throttle; the one-off search does not.
pub struct CatalogClient<T: Throttle> {
    http: Client,
    config: CatalogConfig,
    throttle: T,
}

impl<T: Throttle> CatalogClient<T> {
    pub fn new(config: CatalogConfig, throttle: T) -> Self {
        Self {
            http: build_client(),
            config,
            throttle,
        }
    }

    /// Lists candidate object ids for the configured query. An absent or
    /// null id array in the response is an empty result, not an error.
    pub async fn search_object_ids(&self) -> Result<Vec<u64>, CatalogError> {
        let url = format!(
            "{}/search?q={}",
            self.base_url(),
            encode(&self.config.search_query)
        );
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| CatalogError::Search(err.to_string()))?;
        if !response.status().is_success() {
            return Err(CatalogError::Search(format!("HTTP {}", response.status())));
        }
        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|err| CatalogError::Search(err.to_string()))?;
        Ok(payload.object_ids.unwrap_or_default())
    }

    pub async fn fetch_object(&self, object_id: u64) -> Result<CatalogObject, CatalogError> {
        self.throttle.wait().await;
        let url = format!("{}/objects/{object_id}", self.base_url());
        let response = self.http.get(url).send().await.map_err(|err| {
            CatalogError::Object {
                id: object_id,
                reason: err.to_string(),
            }
        })?;
        if !response.status().is_success() {
            return Err(CatalogError::Object {
                id: object_id,
                reason: format!("HTTP {}", response.status()),
            });
        }
        response.json().await.map_err(|err| CatalogError::Object {
            id: object_id,
            reason: err.to_string(),
        })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "objectIDs", default)]
    object_ids: Option<Vec<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_with_ids() {
        let payload: SearchResponse =
            serde_json::from_str(r#"{"total": 3, "objectIDs": [14, 92, 7]}"#).unwrap();
        assert_eq!(payload.object_ids, Some(vec![14, 92, 7]));
    }

    #[test]
    fn search_response_null_ids_maps_to_empty() {
        let payload: SearchResponse =
            serde_json::from_str(r#"{"total": 0, "objectIDs": null}"#).unwrap();
        assert_eq!(payload.object_ids.unwrap_or_default(), Vec::<u64>::new());
        let payload: SearchResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert_eq!(payload.object_ids.unwrap_or_default(), Vec::<u64>::new());
    }

    #[test]
    fn object_error_names_the_failing_id() {
        let err = CatalogError::Object {
            id: 436535,
            reason: "HTTP 404 Not Found".into(),
        };
        assert!(err.to_string().contains("436535"));
    }
}
