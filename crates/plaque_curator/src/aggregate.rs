//! Variant projection and summary counts.

use crate::model::{DesignToken, DocStats, PropertySection, VariantInfo};
use crate::types::VariantOption;
use plaque_carton::{FxHashMap, OrderedMap};

/// Project the raw variant map, naming each property by its label.
pub fn variant_info(
    variants: &OrderedMap<Vec<VariantOption>>,
    properties: &FxHashMap<String, String>,
) -> Vec<VariantInfo> {
    variants
        .iter()
        .map(|(property_id, options)| VariantInfo {
            property_id: property_id.to_string(),
            property_name: properties
                .get(property_id)
                .cloned()
                .unwrap_or_else(|| property_id.to_string()),
            options: options.clone(),
        })
        .collect()
}

/// Count what a component doc ended up with.
pub fn doc_stats(
    sections: &[PropertySection],
    variants: &[VariantInfo],
    style_blocks: usize,
    tokens: &[DesignToken],
) -> DocStats {
    DocStats {
        property_count: sections.iter().map(|s| s.fields.len()).sum(),
        variant_count: variants.iter().map(|v| v.options.len()).sum(),
        style_count: style_blocks,
        token_count: tokens.len(),
    }
}
