//! Per-property field conversion.
//!
//! Maps a raw property onto a [`FieldSpec`] and extracts a default value in
//! the shape its field kind expects.

use super::family::TypeFamily;
use crate::model::{FieldOption, FieldSpec, LinkValue};
use crate::types::{RawProperty, VariantOption};
use plaque_carton::format_number;
use serde_json::Value;

/// Convert one property into a field.
///
/// `id` has already been made unique by the caller; `variants` are this
/// property's options from the component's variant map.
pub(crate) fn convert_property(
    property: &RawProperty,
    id: String,
    label: &str,
    variants: Option<&[VariantOption]>,
) -> FieldSpec {
    let family = TypeFamily::of(&property.type_tag);

    let mut help_text = property
        .tooltip
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let mut options = Vec::new();

    let default_value = match family {
        TypeFamily::Text => Value::String(text_default(&property.default)),
        TypeFamily::RichText => Value::String(flatten_text(&property.default).trim().to_string()),
        TypeFamily::Number => {
            if let Some(note) = range_note(property.min, property.max) {
                help_text = Some(match help_text {
                    Some(text) => format!("{}\n{}", text, note),
                    None => note,
                });
            }
            number_default(&property.default)
        }
        TypeFamily::Boolean => {
            options = segmented(&[("true", "On"), ("false", "Off")]);
            Value::Bool(bool_default(&property.default))
        }
        TypeFamily::Choice => Value::String(text_default(&property.default)),
        TypeFamily::StyleVariant => {
            options = variants
                .unwrap_or_default()
                .iter()
                .map(|v| FieldOption {
                    value: v.id.clone(),
                    label: v.name.clone(),
                })
                .collect();
            match property.default.as_str().map(str::trim) {
                Some(id) if !id.is_empty() => Value::String(id.to_string()),
                _ => Value::String("base".to_string()),
            }
        }
        TypeFamily::Visibility => {
            options = segmented(&[("visible", "Visible"), ("hidden", "Hidden")]);
            Value::String(visibility_default(&property.default).to_string())
        }
        TypeFamily::Slot => property.default.clone(),
        TypeFamily::Link => {
            serde_json::to_value(link_default(&property.default)).unwrap_or(Value::Null)
        }
    };

    FieldSpec {
        id,
        property_id: property.id.clone(),
        label: label.to_string(),
        kind: family.field_kind(),
        type_tag: property.type_tag.clone(),
        default_value,
        help_text,
        options,
        bindable: property.bindable,
    }
}

fn segmented(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(value, label)| FieldOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

/// Human-readable note for numeric bounds.
fn range_note(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "Range: {} to {}",
            format_number(min),
            format_number(max)
        )),
        (Some(min), None) => Some(format!("Range: {} and above", format_number(min))),
        (None, Some(max)) => Some(format!("Range: up to {}", format_number(max))),
        (None, None) => None,
    }
}

fn text_default(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => flatten_text(value).trim().to_string(),
    }
}

fn number_default(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn bool_default(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// An empty condition list means the element is shown.
fn visibility_default(value: &Value) -> &'static str {
    let has_conditions = match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.trim().is_empty(),
        Value::Bool(visible) => !visible,
        Value::Number(_) => true,
    };
    if has_conditions {
        "hidden"
    } else {
        "visible"
    }
}

/// Concatenate every text fragment of a nested rich-text or list value.
fn flatten_text(value: &Value) -> String {
    let mut out = String::new();
    collect_text(value, &mut out);
    out
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            }
            for key in ["children", "content", "items", "value"] {
                if let Some(nested) = map.get(key) {
                    collect_text(nested, out);
                }
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn link_default(value: &Value) -> LinkValue {
    let mut link = LinkValue::default();
    let Some(map) = value.as_object() else {
        if let Some(url) = value.as_str().map(str::trim).filter(|u| !u.is_empty()) {
            link.url = url.to_string();
        }
        return link;
    };

    let text = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    if let Some(mode) = text("mode").or_else(|| text("type")) {
        link.link_type = match mode.to_ascii_lowercase().as_str() {
            "external" | "url" => "url",
            "page" => "page",
            "email" => "email",
            "phone" => "phone",
            "section" => "section",
            _ => "url",
        }
        .to_string();
    }

    if let Some(url) = text("url").or_else(|| text("href")) {
        link.url = url.to_string();
    }

    let new_tab = map.get("newTab").and_then(Value::as_bool).unwrap_or(false);
    if let Some(open_in) = text("openIn") {
        link.open_in = open_in.to_string();
    } else if new_tab || text("target") == Some("_blank") {
        link.open_in = "new".to_string();
    }

    if let Some(preload) = text("preload") {
        link.preload = preload.to_string();
    }

    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use serde_json::json;

    fn property(value: Value) -> RawProperty {
        serde_json::from_value(value).unwrap()
    }

    fn convert(value: Value) -> FieldSpec {
        let prop = property(value);
        let label = prop.split_label().1.to_string();
        convert_property(&prop, "field".to_string(), &label, None)
    }

    #[test]
    fn test_number_range_note() {
        let field = convert(json!({
            "id": "p1", "label": "Columns", "type": "number",
            "default": 3, "min": 1, "max": 12, "tooltip": "Grid columns"
        }));
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.default_value, json!(3));
        assert_eq!(field.help_text.as_deref(), Some("Grid columns\nRange: 1 to 12"));
    }

    #[test]
    fn test_rich_text_flattening() {
        let field = convert(json!({
            "id": "p1", "label": "Body", "type": "rich-text",
            "default": [
                { "type": "paragraph", "children": [{ "text": "Hello " }, { "text": "world" }] }
            ]
        }));
        assert_eq!(field.default_value, json!("Hello world"));
    }

    #[test]
    fn test_visibility_inversion() {
        let shown = convert(json!({ "id": "p1", "type": "visibility-conditions", "default": [] }));
        assert_eq!(shown.default_value, json!("visible"));
        assert_eq!(shown.kind, FieldKind::Segmented);

        let hidden = convert(json!({
            "id": "p2", "type": "visibility-conditions",
            "default": [{ "prop": "p1", "equals": true }]
        }));
        assert_eq!(hidden.default_value, json!("hidden"));

        let absent = convert(json!({ "id": "p3", "type": "visibility-conditions" }));
        assert_eq!(absent.default_value, json!("visible"));
    }

    #[test]
    fn test_style_variant_defaults_to_base() {
        let prop = property(json!({ "id": "p1", "label": "Variant", "type": "style-variant" }));
        let options = vec![
            VariantOption { id: "v1".to_string(), name: "Primary".to_string() },
            VariantOption { id: "v2".to_string(), name: "Ghost".to_string() },
        ];
        let field = convert_property(&prop, "variant".to_string(), "Variant", Some(&options));
        assert_eq!(field.kind, FieldKind::Style);
        assert_eq!(field.default_value, json!("base"));
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[1].label, "Ghost");
    }

    #[test]
    fn test_link_normalization() {
        let field = convert(json!({
            "id": "p1", "label": "Link", "type": "link",
            "default": { "mode": "external", "url": "https://example.com", "target": "_blank" }
        }));
        assert_eq!(field.kind, FieldKind::Link);
        assert_eq!(
            field.default_value,
            json!({ "type": "url", "url": "https://example.com", "openIn": "new", "preload": "default" })
        );

        let empty = convert(json!({ "id": "p2", "type": "link" }));
        assert_eq!(
            empty.default_value,
            json!({ "type": "url", "url": "#", "openIn": "this", "preload": "default" })
        );

        let email = convert(json!({ "id": "p3", "type": "link", "default": { "mode": "email", "url": "mailto:a@b.c" } }));
        assert_eq!(email.default_value["type"], "email");
    }

    #[test]
    fn test_boolean_default() {
        let field = convert(json!({ "id": "p1", "type": "boolean", "default": "true" }));
        assert_eq!(field.default_value, json!(true));
        assert_eq!(field.options.len(), 2);
    }
}
