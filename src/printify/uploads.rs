use super::PrintifyClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image upload failed: {0}")]
    Request(String),
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file_name: &'a str,
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

impl PrintifyClient {
    /// Registers an image by source URL; Printify fetches the bytes
    /// itself. Returns the opaque image id used in print areas.
    pub async fn upload_image(&self, image_url: &str) -> Result<String, UploadError> {
        let payload = UploadRequest {
            file_name: file_name_from_url(image_url),
            url: image_url,
        };
        let response = self
            .http
            .post(format!("{}/v1/uploads/images.json", self.api_base()))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| UploadError::Request(err.to_string()))?;
        if !response.status().is_success() {
            return Err(UploadError::Request(format!("HTTP {}", response.status())));
        }
        let payload: UploadResponse = response
            .json()
            .await
            .map_err(|err| UploadError::Request(err.to_string()))?;
        Ok(payload.id)
    }
}

/// Last path segment of the source URL, falling back to the whole URL
/// when there is none to fall back on.
fn file_name_from_url(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(url)
}
