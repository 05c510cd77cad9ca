use super::PrintifyClient;
use super::catalog::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product creation failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub blueprint_id: u32,
    pub print_provider_id: u32,
    pub variants: Vec<VariantPayload>,
    pub print_areas: Vec<PrintArea>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantPayload {
    pub id: u64,
    pub price: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrintArea {
    pub variant_ids: Vec<u64>,
    pub placeholders: Vec<PlacementPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementPayload {
    pub position: &'static str,
    pub images: Vec<ImagePlacement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagePlacement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub angle: f64,
}

impl ImagePlacement {
    /// Centered placement at default scale and rotation.
    pub fn centered(image_id: &str) -> Self {
        Self {
            id: image_id.to_string(),
            x: 0.5,
            y: 0.5,
            scale: 1.0,
            angle: 0.0,
        }
    }
}

impl CreateProductRequest {
    /// A single-variant listing with one front-facing print area.
    pub fn single_variant(
        title: String,
        description: String,
        image_id: &str,
        variant: &Variant,
        price: u32,
        print_provider_id: u32,
    ) -> Self {
        Self {
            title,
            description,
            blueprint_id: variant.blueprint_id,
            print_provider_id,
            variants: vec![VariantPayload {
                id: variant.id,
                price,
            }],
            print_areas: vec![PrintArea {
                variant_ids: vec![variant.id],
                placeholders: vec![PlacementPayload {
                    position: "front",
                    images: vec![ImagePlacement::centered(image_id)],
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedProduct {
    id: String,
}

impl PrintifyClient {
    pub async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<String, ProductError> {
        let url = format!(
            "{}/v1/shops/{}/products.json",
            self.api_base(),
            self.config.shop_id,
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|err| ProductError::Request(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ProductError::Request(format!("HTTP {}", response.status())));
        }
        let payload: CreatedProduct = response
            .json()
            .await
            .map_err(|err| ProductError::Request(err.to_string()))?;
        Ok(payload.id)
    }
}
