use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;

/// One record from the art catalog's object-detail endpoint. Only the
/// fields the pipeline consumes are modeled; the API returns many more.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogObject {
    #[serde(rename = "objectID")]
    pub object_id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "primaryImage", default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub measurements: Option<Vec<MeasurementGroup>>,
}

/// A named group of physical measurements, e.g. "Overall" or "Frame",
/// mapping dimension names ("Width", "Height", ...) to values.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementGroup {
    #[serde(rename = "elementName")]
    pub element_name: String,
    #[serde(rename = "elementMeasurements", default)]
    pub element_measurements: Option<HashMap<String, f64>>,
}

impl CatalogObject {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Generic Title")
    }

    /// The "Overall" measurement group's dimension mapping, if present.
    /// Objects without one cannot be matched against print areas.
    pub fn overall_dimensions(&self) -> Option<&HashMap<String, f64>> {
        self.measurements
            .as_ref()?
            .iter()
            .find(|group| group.element_name == "Overall")
            .and_then(|group| group.element_measurements.as_ref())
    }
}

/// Outcome of processing a single catalog object.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    pub object_id: u64,
    pub product_id: Option<String>,
    pub blueprint_id: Option<u32>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub elapsed_ms: u128,
}

impl ObjectReport {
    pub fn created(
        object_id: u64,
        product_id: String,
        blueprint_id: u32,
        elapsed_ms: u128,
    ) -> Self {
        Self {
            object_id,
            product_id: Some(product_id),
            blueprint_id: Some(blueprint_id),
            error: None,
            timestamp: Utc::now(),
            elapsed_ms,
        }
    }

    pub fn failed(object_id: u64, error: String, elapsed_ms: u128) -> Self {
        Self {
            object_id,
            product_id: None,
            blueprint_id: None,
            error: Some(error),
            timestamp: Utc::now(),
            elapsed_ms,
        }
    }
}

/// Aggregate of one full run, in processing order.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<ObjectReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: ObjectReport) {
        self.reports.push(report);
    }

    pub fn created_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.product_id.is_some())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.len() - self.created_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_from_json(raw: &str) -> CatalogObject {
        serde_json::from_str(raw).expect("catalog object json")
    }

    #[test]
    fn overall_dimensions_found_by_name() {
        let object = object_from_json(
            r#"{
                "objectID": 436535,
                "title": "Wheat Field with Cypresses",
                "primaryImage": "https://images.example.org/DP-1.jpg",
                "measurements": [
                    {"elementName": "Frame", "elementMeasurements": {"Height": 100.0, "Width": 120.0}},
                    {"elementName": "Overall", "elementMeasurements": {"Height": 73.2, "Width": 93.4}}
                ]
            }"#,
        );
        let dims = object.overall_dimensions().expect("overall group");
        assert_eq!(dims.get("Width"), Some(&93.4));
        assert_eq!(dims.get("Height"), Some(&73.2));
    }

    #[test]
    fn overall_dimensions_absent_when_no_group_matches() {
        let object = object_from_json(
            r#"{
                "objectID": 1,
                "measurements": [
                    {"elementName": "Frame", "elementMeasurements": {"Height": 10.0}}
                ]
            }"#,
        );
        assert!(object.overall_dimensions().is_none());
    }

    #[test]
    fn overall_dimensions_absent_when_measurements_null() {
        let object = object_from_json(r#"{"objectID": 2, "measurements": null}"#);
        assert!(object.overall_dimensions().is_none());
    }

    #[test]
    fn overall_group_without_mapping_yields_none() {
        let object =
            object_from_json(r#"{"objectID": 3, "measurements": [{"elementName": "Overall"}]}"#);
        assert!(object.overall_dimensions().is_none());
    }

    #[test]
    fn display_title_falls_back_when_missing_or_blank() {
        let untitled = object_from_json(r#"{"objectID": 4}"#);
        assert_eq!(untitled.display_title(), "Generic Title");
        let blank = object_from_json(r#"{"objectID": 5, "title": "  "}"#);
        assert_eq!(blank.display_title(), "Generic Title");
        let titled = object_from_json(r#"{"objectID": 6, "title": "Irises"}"#);
        assert_eq!(titled.display_title(), "Irises");
    }

    #[test]
    fn failed_report_serializes_without_product_fields() {
        let report = ObjectReport::failed(9, "boom".into(), 12);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("product_id").is_none());
        assert_eq!(value["error"], "boom");
    }
}
