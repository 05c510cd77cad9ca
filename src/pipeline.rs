use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::copy;
use crate::llm::LlmClient;
use crate::matcher;
use crate::models::{ObjectReport, RunSummary};
use crate::printify::catalog::Variant;
use crate::printify::{CreateProductRequest, PrintifyClient};
use crate::throttle::FixedDelay;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
#[error("stage `{stage}` failed: {message}")]
pub struct PipelineError {
    stage: &'static str,
    message: String,
    kind: PipelineErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    /// Pre-loop failure; aborts the whole run.
    Setup,
    Fetch,
    NoMatch,
    Generation,
    Publish,
}

impl PipelineError {
    pub fn setup(stage: &'static str, message: impl Into<String>) -> Self {
        Self::with_kind(stage, message, PipelineErrorKind::Setup)
    }

    pub fn fetch(stage: &'static str, message: impl Into<String>) -> Self {
        Self::with_kind(stage, message, PipelineErrorKind::Fetch)
    }

    pub fn no_match(stage: &'static str, message: impl Into<String>) -> Self {
        Self::with_kind(stage, message, PipelineErrorKind::NoMatch)
    }

    pub fn generation(stage: &'static str, message: impl Into<String>) -> Self {
        Self::with_kind(stage, message, PipelineErrorKind::Generation)
    }

    pub fn publish(stage: &'static str, message: impl Into<String>) -> Self {
        Self::with_kind(stage, message, PipelineErrorKind::Publish)
    }

    fn with_kind(stage: &'static str, message: impl Into<String>, kind: PipelineErrorKind) -> Self {
        Self {
            stage,
            message: message.into(),
            kind,
        }
    }

    pub fn stage(&self) -> &'static str {
        self.stage
    }

    pub fn kind(&self) -> PipelineErrorKind {
        self.kind
    }
}

/// One blueprint's variant catalog, loaded once per run.
struct BlueprintCatalog {
    blueprint_id: u32,
    variants: Vec<Variant>,
}

pub struct Pipeline {
    config: Arc<AppConfig>,
    catalog: CatalogClient<FixedDelay>,
    printify: PrintifyClient,
    llm: LlmClient,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let catalog =
            CatalogClient::new(config.catalog.clone(), FixedDelay::new(config.detail_delay));
        let printify = PrintifyClient::new(config.printify.clone());
        let llm = LlmClient::new(config.llm.clone());
        Self {
            config: Arc::new(config),
            catalog,
            printify,
            llm,
        }
    }

    /// Runs the whole pipeline: setup phase first (any failure aborts),
    /// then one bounded attempt per object id.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let object_ids = self
            .catalog
            .search_object_ids()
            .await
            .map_err(|err| PipelineError::setup("search_objects", err.to_string()))?;
        info!(
            target = "museprint.catalog",
            count = object_ids.len(),
            "object search complete"
        );

        let catalogs = self.load_blueprint_catalogs().await?;

        let mut summary = RunSummary::default();
        for object_id in object_ids {
            let started = Instant::now();
            match self.process_object(object_id, &catalogs).await {
                Ok(report) => {
                    info!(
                        target = "museprint.pipeline",
                        object_id,
                        product_id = report.product_id.as_deref().unwrap_or_default(),
                        "product created"
                    );
                    summary.push(report);
                }
                Err(err) => {
                    error!(
                        target = "museprint.pipeline",
                        object_id,
                        stage = err.stage(),
                        kind = ?err.kind(),
                        "error processing object {object_id}: {err}"
                    );
                    summary.push(ObjectReport::failed(
                        object_id,
                        err.to_string(),
                        started.elapsed().as_millis(),
                    ));
                }
            }
        }
        Ok(summary)
    }

    async fn load_blueprint_catalogs(&self) -> Result<Vec<BlueprintCatalog>, PipelineError> {
        let mut catalogs = Vec::with_capacity(self.config.blueprints.len());
        for &blueprint_id in &self.config.blueprints {
            let variants = self
                .printify
                .blueprint_variants(blueprint_id)
                .await
                .map_err(|err| PipelineError::setup("load_variants", err.to_string()))?;
            info!(
                target = "museprint.printify",
                blueprint_id,
                count = variants.len(),
                "variant catalog loaded"
            );
            catalogs.push(BlueprintCatalog {
                blueprint_id,
                variants,
            });
        }
        Ok(catalogs)
    }

    /// Fetch → extract dimensions → first blueprint with a usable match
    /// wins → upload → generate copy → create product. The uploaded
    /// image is not cleaned up when a later step fails.
    async fn process_object(
        &self,
        object_id: u64,
        catalogs: &[BlueprintCatalog],
    ) -> Result<ObjectReport, PipelineError> {
        let started = Instant::now();

        let object = self
            .catalog
            .fetch_object(object_id)
            .await
            .map_err(|err| PipelineError::fetch("fetch_details", err.to_string()))?;
        debug!(
            target = "museprint.catalog",
            object_id = object.object_id,
            title = object.display_title(),
            "object details fetched"
        );

        let image_url = object
            .primary_image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| PipelineError::fetch("fetch_details", "object has no primary image"))?;

        let Some(dimensions) = object.overall_dimensions() else {
            return Err(PipelineError::no_match(
                "match_variant",
                "object has no Overall measurements",
            ));
        };

        for catalog in catalogs {
            let Some(matched) = matcher::find_best_match(dimensions, &catalog.variants) else {
                continue;
            };
            debug!(
                target = "museprint.pipeline",
                object_id,
                blueprint_id = catalog.blueprint_id,
                variant_id = matched.variant.id,
                difference = matched.difference,
                "variant matched"
            );

            let image_id = self
                .printify
                .upload_image(image_url)
                .await
                .map_err(|err| PipelineError::publish("upload_image", err.to_string()))?;

            let listing_copy = copy::generate(
                &self.llm,
                object.display_title(),
                matched.variant.display_title(),
            )
            .await
            .map_err(|err| PipelineError::generation("generate_copy", err.to_string()))?;

            let request = CreateProductRequest::single_variant(
                listing_copy.title,
                listing_copy.description,
                &image_id,
                &matched.variant,
                matched.price,
                self.printify.print_provider_id(),
            );
            let product_id = self
                .printify
                .create_product(&request)
                .await
                .map_err(|err| PipelineError::publish("create_product", err.to_string()))?;

            return Ok(ObjectReport::created(
                object_id,
                product_id,
                catalog.blueprint_id,
                started.elapsed().as_millis(),
            ));
        }

        Err(PipelineError::no_match(
            "match_variant",
            "no blueprint variant matched the image aspect ratio",
        ))
    }
}
