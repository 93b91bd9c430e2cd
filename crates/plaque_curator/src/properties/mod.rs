//! Property classification.
//!
//! Turns a component's raw property list into ordered [`PropertySection`]s:
//! Variants, named groups (alphabetical), Slots, Visibility, Settings,
//! Advanced. Empty sections are omitted.
//!
//! # Example
//!
//! ```
//! use plaque_curator::properties::classify_properties;
//! use plaque_curator::types::{RawProperty, VariantOption};
//! use plaque_carton::OrderedMap;
//!
//! let props: Vec<RawProperty> = serde_json::from_str(r#"[
//!   { "id": "p1", "label": "Label", "type": "text", "default": "Click" },
//!   { "id": "p2", "label": "Icon/Position", "type": "option" }
//! ]"#).unwrap();
//!
//! let sections = classify_properties(&props, &OrderedMap::<Vec<VariantOption>>::default());
//! assert_eq!(sections[0].title, "Icon");
//! assert_eq!(sections[1].title, "Settings");
//! ```

mod family;
mod fields;

pub use family::TypeFamily;

use crate::model::{PropertySection, SectionKind};
use crate::types::{RawProperty, VariantOption};
use plaque_carton::{kebab_case, NameRegistry, OrderedMap};

/// Pick the section a property belongs to. First match wins.
fn section_for<'a>(property: &'a RawProperty, group: Option<&'a str>) -> (SectionKind, Option<&'a str>) {
    match TypeFamily::of(&property.type_tag) {
        TypeFamily::StyleVariant => (SectionKind::Variants, None),
        TypeFamily::Slot => (SectionKind::Slots, None),
        TypeFamily::Visibility => (SectionKind::Visibility, None),
        _ if property.is_private => (SectionKind::Advanced, None),
        _ => match group {
            Some(group) => (SectionKind::Group, Some(group)),
            None => (SectionKind::Settings, None),
        },
    }
}

/// Classify a component's properties into ordered sections.
pub fn classify_properties(
    properties: &[RawProperty],
    variants: &OrderedMap<Vec<VariantOption>>,
) -> Vec<PropertySection> {
    let mut ids = NameRegistry::new();
    let mut fixed: Vec<PropertySection> = Vec::new();
    let mut groups: Vec<PropertySection> = Vec::new();

    for property in properties {
        let (group, name) = property.split_label();

        let mut base = kebab_case(name);
        if base.is_empty() {
            base = kebab_case(&property.id);
        }
        if base.is_empty() {
            base = "field".to_string();
        }
        let id = ids.claim(&base);

        let field = fields::convert_property(
            property,
            id,
            name,
            variants.get(&property.id).map(Vec::as_slice),
        );

        let (kind, group) = section_for(property, group);
        let (bucket, title) = match group {
            Some(group) => (&mut groups, group.to_string()),
            None => (&mut fixed, kind.title().to_string()),
        };

        match bucket.iter_mut().find(|s| s.kind == kind && s.title == title) {
            Some(section) => section.fields.push(field),
            None => bucket.push(PropertySection {
                title,
                kind,
                fields: vec![field],
            }),
        }
    }

    groups.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title))
    });
    fixed.sort_by_key(|s| s.kind);

    // Variants first, named groups next, then the remaining fixed sections.
    let mut sections = Vec::with_capacity(fixed.len() + groups.len());
    let split = fixed
        .iter()
        .position(|s| s.kind != SectionKind::Variants)
        .unwrap_or(fixed.len());
    let rest = fixed.split_off(split);
    sections.extend(fixed);
    sections.extend(groups);
    sections.extend(rest);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Vec<RawProperty> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_section_order() {
        let properties = props(json!([
            { "id": "p1", "label": "Label", "type": "text" },
            { "id": "p2", "label": "Tracking ID", "type": "text", "isPrivate": true },
            { "id": "p3", "label": "Visibility", "type": "visibility-conditions", "default": [] },
            { "id": "p4", "label": "Layout/Gap", "type": "number" },
            { "id": "p5", "label": "Content", "type": "slot" },
            { "id": "p6", "label": "Icon/Name", "type": "text" },
            { "id": "p7", "label": "Variant", "type": "style-variant" },
            { "id": "p8", "label": "layout/Wrap", "type": "boolean" }
        ]));

        let sections = classify_properties(&properties, &OrderedMap::default());
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Variants", "Icon", "Layout", "layout", "Slots", "Visibility", "Settings", "Advanced"]
        );
        assert_eq!(sections[0].fields[0].kind, FieldKind::Style);
        assert_eq!(sections[2].fields[0].label, "Gap");
    }

    #[test]
    fn test_precedence_style_variant_beats_private() {
        let properties = props(json!([
            { "id": "p1", "label": "Theme/Variant", "type": "style-variant", "isPrivate": true },
            { "id": "p2", "label": "Theme/Secret", "type": "text", "isPrivate": true }
        ]));

        let sections = classify_properties(&properties, &OrderedMap::default());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, SectionKind::Variants);
        assert_eq!(sections[1].kind, SectionKind::Advanced);
    }

    #[test]
    fn test_field_ids_deduplicated() {
        let properties = props(json!([
            { "id": "p1", "label": "Size", "type": "text" },
            { "id": "p2", "label": "Icon/Size", "type": "text" },
            { "id": "p3", "label": "Size", "type": "number" }
        ]));

        let sections = classify_properties(&properties, &OrderedMap::default());
        let mut ids: Vec<_> = sections
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.id.clone()))
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["size", "size-2", "size-3"]);
    }

    #[test]
    fn test_empty_sections_omitted() {
        assert!(classify_properties(&[], &OrderedMap::default()).is_empty());
    }
}
