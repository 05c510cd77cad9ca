use super::PrintifyClient;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("variant fetch for blueprint {blueprint_id} failed: {reason}")]
    Request { blueprint_id: u32, reason: String },
}

/// A purchasable configuration of a blueprint. `blueprint_id` is not part
/// of the wire payload; it is tagged on after the fetch so downstream
/// stages know which product template a variant belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    #[serde(default)]
    pub blueprint_id: u32,
}

impl Variant {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Generic Variant")
    }
}

/// A print-area region within a variant, in pixels. Some catalog entries
/// ship partial regions; missing dimensions exclude the region from
/// matching rather than failing the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Placeholder {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VariantsResponse {
    #[serde(default)]
    variants: Vec<Variant>,
}

impl PrintifyClient {
    /// Variants for one blueprint from the configured print provider,
    /// with out-of-stock entries excluded server-side.
    pub async fn blueprint_variants(&self, blueprint_id: u32) -> Result<Vec<Variant>, VariantError> {
        let url = format!(
            "{}/v1/catalog/blueprints/{blueprint_id}/print_providers/{}/variants.json",
            self.api_base(),
            self.config.print_provider_id,
        );
        let response = self
            .http
            .get(url)
            .query(&[("show-out-of-stock", "0")])
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|err| VariantError::Request {
                blueprint_id,
                reason: err.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(VariantError::Request {
                blueprint_id,
                reason: format!("HTTP {}", response.status()),
            });
        }
        let payload: VariantsResponse =
            response.json().await.map_err(|err| VariantError::Request {
                blueprint_id,
                reason: err.to_string(),
            })?;
        Ok(tag_variants(payload.variants, blueprint_id))
    }
}

fn tag_variants(mut variants: Vec<Variant>, blueprint_id: u32) -> Vec<Variant> {
    for variant in &mut variants {
        variant.blueprint_id = blueprint_id;
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_variants() {
        let payload: VariantsResponse = serde_json::from_str(
            r#"{
                "id": 50,
                "variants": [
                    {
                        "id": 33742,
                        "title": "12\" x 18\" / Matte",
                        "placeholders": [
                            {"position": "front", "width": 3600, "height": 5400}
                        ]
                    },
                    {"id": 33743, "placeholders": []}
                ]
            }"#,
        )
        .expect("variants json");
        assert_eq!(payload.variants.len(), 2);
        let first = &payload.variants[0];
        assert_eq!(first.placeholders[0].width, Some(3600.0));
        assert_eq!(first.display_title(), "12\" x 18\" / Matte");
        assert_eq!(payload.variants[1].display_title(), "Generic Variant");
    }

    #[test]
    fn tagging_sets_blueprint_on_every_variant() {
        let variants = vec![
            Variant {
                id: 1,
                title: None,
                placeholders: Vec::new(),
                blueprint_id: 0,
            },
            Variant {
                id: 2,
                title: None,
                placeholders: Vec::new(),
                blueprint_id: 0,
            },
        ];
        let tagged = tag_variants(variants, 194);
        assert!(tagged.iter().all(|variant| variant.blueprint_id == 194));
    }

    #[test]
    fn missing_variant_array_is_empty() {
        let payload: VariantsResponse = serde_json::from_str(r#"{"id": 50}"#).unwrap();
        assert!(payload.variants.is_empty());
    }
}
