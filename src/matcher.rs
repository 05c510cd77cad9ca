use crate::printify::catalog::{Placeholder, Variant};
use std::collections::HashMap;

/// Flat price assigned to every matched variant.
pub const DEFAULT_PRICE: u32 = 100;

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub variant: Variant,
    pub price: u32,
    /// Winning |image ratio − placeholder ratio|, kept for logging.
    pub difference: f64,
}

/// Width/height ratio from a dimension mapping. Requires both a "Width"
/// and a "Height" entry and a positive height.
pub fn aspect_ratio(dimensions: &HashMap<String, f64>) -> Option<f64> {
    let width = dimensions.get("Width")?;
    let height = dimensions.get("Height")?;
    if *height <= 0.0 {
        return None;
    }
    Some(width / height)
}

fn placeholder_ratio(placeholder: &Placeholder) -> Option<f64> {
    let width = placeholder.width?;
    let height = placeholder.height?;
    if height <= 0.0 {
        return None;
    }
    Some(width / height)
}

/// Scans every placeholder of every variant and returns the variant
/// owning the placeholder whose aspect ratio is closest to the image's.
/// Comparison is strict less-than, so ties keep the first pair seen in
/// input order. Returns `None` when the image has no usable ratio or no
/// placeholder has one.
pub fn find_best_match(
    dimensions: &HashMap<String, f64>,
    variants: &[Variant],
) -> Option<MatchResult> {
    let image_ratio = aspect_ratio(dimensions)?;

    let mut best: Option<(usize, f64)> = None;
    for (index, variant) in variants.iter().enumerate() {
        for placeholder in &variant.placeholders {
            let Some(ratio) = placeholder_ratio(placeholder) else {
                continue;
            };
            let difference = (image_ratio - ratio).abs();
            if best.is_none_or(|(_, smallest)| difference < smallest) {
                best = Some((index, difference));
            }
        }
    }

    best.map(|(index, difference)| MatchResult {
        variant: variants[index].clone(),
        price: DEFAULT_PRICE,
        difference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: f64, height: f64) -> HashMap<String, f64> {
        HashMap::from([("Width".to_string(), width), ("Height".to_string(), height)])
    }

    fn placeholder(width: f64, height: f64) -> Placeholder {
        Placeholder {
            width: Some(width),
            height: Some(height),
        }
    }

    fn variant(id: u64, placeholders: Vec<Placeholder>) -> Variant {
        Variant {
            id,
            title: Some(format!("variant-{id}")),
            placeholders,
            blueprint_id: 50,
        }
    }

    #[test]
    fn picks_the_variant_with_the_closest_ratio() {
        let variants = vec![
            variant(1, vec![placeholder(300.0, 100.0)]),
            variant(2, vec![placeholder(400.0, 200.0)]),
        ];
        let result = find_best_match(&dims(1000.0, 500.0), &variants).expect("match");
        assert_eq!(result.variant.id, 2);
        assert_eq!(result.difference, 0.0);
        assert_eq!(result.price, DEFAULT_PRICE);
    }

    #[test]
    fn ties_keep_the_first_variant_in_input_order() {
        let variants = vec![
            variant(7, vec![placeholder(200.0, 100.0)]),
            variant(8, vec![placeholder(400.0, 200.0)]),
        ];
        let result = find_best_match(&dims(1000.0, 500.0), &variants).expect("match");
        assert_eq!(result.variant.id, 7);
    }

    #[test]
    fn best_placeholder_is_tracked_across_all_of_a_variants_regions() {
        let variants = vec![
            variant(3, vec![placeholder(100.0, 100.0), placeholder(199.0, 100.0)]),
            variant(4, vec![placeholder(500.0, 100.0)]),
        ];
        let result = find_best_match(&dims(1000.0, 500.0), &variants).expect("match");
        assert_eq!(result.variant.id, 3);
        assert!((result.difference - 0.01).abs() < 1e-9);
    }

    #[test]
    fn missing_width_or_height_yields_no_match() {
        let variants = vec![variant(1, vec![placeholder(400.0, 200.0)])];
        let only_height = HashMap::from([("Height".to_string(), 50.0)]);
        assert!(find_best_match(&only_height, &variants).is_none());
        let only_width = HashMap::from([("Width".to_string(), 50.0)]);
        assert!(find_best_match(&only_width, &variants).is_none());
    }

    #[test]
    fn zero_height_yields_no_match() {
        let variants = vec![variant(1, vec![placeholder(400.0, 200.0)])];
        assert!(find_best_match(&dims(1000.0, 0.0), &variants).is_none());
    }

    #[test]
    fn empty_variant_list_yields_no_match() {
        assert!(find_best_match(&dims(1000.0, 500.0), &[]).is_none());
    }

    #[test]
    fn variants_without_usable_placeholders_yield_no_match() {
        let dimensionless = Placeholder {
            width: None,
            height: None,
        };
        let variants = vec![variant(1, Vec::new()), variant(2, vec![dimensionless])];
        assert!(find_best_match(&dims(1000.0, 500.0), &variants).is_none());
    }

    #[test]
    fn placeholder_with_zero_height_is_skipped() {
        let variants = vec![variant(
            5,
            vec![placeholder(400.0, 0.0), placeholder(300.0, 100.0)],
        )];
        let result = find_best_match(&dims(1000.0, 500.0), &variants).expect("match");
        assert_eq!(result.variant.id, 5);
        assert!((result.difference - 1.0).abs() < 1e-9);
    }
}
