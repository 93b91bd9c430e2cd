//! Top-level shape checks.
//!
//! Runs on borrowed raw JSON slices so that a missing field is reported as
//! exactly that, rather than as a typed decode error somewhere deep inside,
//! and so that no component is materialized before it is decoded on its own.

use crate::types::ValidationError;
use plaque_carton::FxHashMap;
use serde::Deserialize;
use serde_json::value::RawValue;

/// Fields of one JSON object, values left undecoded.
pub(crate) type RawFields<'a> = FxHashMap<String, &'a RawValue>;

/// Root object of a dump with its components split out.
pub(crate) struct RootShape<'a> {
    pub fields: RawFields<'a>,
    pub components: Vec<&'a RawValue>,
}

/// Deserialize without serde_json's recursion limit.
///
/// Only safe for targets that skip over nested values iteratively
/// (`&RawValue` and maps or sequences of it), or after the input's nesting
/// has been bounded.
pub(crate) fn from_str_unbounded<'a, T: Deserialize<'a>>(
    source: &'a str,
) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(source);
    de.disable_recursion_limit();
    let value = T::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// Validate the top-level shape of a dump and split out its components.
pub(crate) fn validate_root(source: &str) -> Result<RootShape<'_>, ValidationError> {
    let root: &RawValue = from_str_unbounded(source)?;
    let fields: RawFields =
        from_str_unbounded(root.get()).map_err(|_| ValidationError::NotAnObject)?;

    if !fields.contains_key("breakpoints") {
        return Err(ValidationError::MissingField("breakpoints"));
    }

    let Some(components) = fields.get("components") else {
        return Err(ValidationError::MissingField("components"));
    };
    let components: Vec<&RawValue> = from_str_unbounded(components.get())
        .map_err(|_| ValidationError::ComponentsNotArray)?;
    let Some(first) = components.first() else {
        return Err(ValidationError::NoComponents);
    };

    let first: RawFields = from_str_unbounded(first.get()).unwrap_or_default();
    for field in ["name", "render", "properties"] {
        if !first.contains_key(field) {
            return Err(ValidationError::FirstComponentIncomplete(field));
        }
    }

    Ok(RootShape { fields, components })
}

/// Best-effort `(name, id)` of a component that failed to decode.
pub(crate) fn component_identity(raw: &RawValue, index: usize) -> (String, String) {
    let fields: RawFields = from_str_unbounded(raw.get()).unwrap_or_default();
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(|v| serde_json::from_str::<String>(v.get()).ok())
    };
    let id = text("id").unwrap_or_else(|| format!("#{}", index));
    let name = text("name").unwrap_or_else(|| id.clone());
    (name, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> &RawValue {
        serde_json::from_str(source).unwrap()
    }

    #[test]
    fn test_rejects_missing_fields() {
        let err = validate_root(r#"{ "components": [] }"#).err().unwrap();
        assert!(matches!(err, ValidationError::MissingField("breakpoints")));

        let err = validate_root(r#"{ "breakpoints": {} }"#).err().unwrap();
        assert!(matches!(err, ValidationError::MissingField("components")));

        let err = validate_root("[]").err().unwrap();
        assert!(matches!(err, ValidationError::NotAnObject));

        let err = validate_root(r#"{ "breakpoints": {}, "components": {} }"#).err().unwrap();
        assert!(matches!(err, ValidationError::ComponentsNotArray));
    }

    #[test]
    fn test_rejects_empty_and_incomplete() {
        let err = validate_root(r#"{ "breakpoints": {}, "components": [] }"#).err().unwrap();
        assert!(matches!(err, ValidationError::NoComponents));

        let err = validate_root(
            r#"{
              "breakpoints": {},
              "components": [{ "id": "c1", "name": "Button", "properties": [] }]
            }"#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, ValidationError::FirstComponentIncomplete("render")));
    }

    #[test]
    fn test_accepts_minimal_dump() {
        let shape = validate_root(
            r#"{
              "breakpoints": {},
              "components": [{ "id": "c1", "name": "Button", "render": null, "properties": [] }]
            }"#,
        )
        .unwrap();
        assert_eq!(shape.components.len(), 1);
        assert!(shape.fields.contains_key("breakpoints"));
    }

    #[test]
    fn test_deep_component_does_not_fail_validation() {
        let deep = format!("{}{}", "[".repeat(5000), "]".repeat(5000));
        let source = format!(
            r#"{{
              "breakpoints": {{}},
              "components": [
                {{ "id": "c1", "name": "Button", "render": null, "properties": [] }},
                {{ "id": "c2", "name": "Deep", "render": {deep}, "properties": [] }}
              ]
            }}"#
        );
        let shape = validate_root(&source).unwrap();
        assert_eq!(shape.components.len(), 2);
    }

    #[test]
    fn test_component_identity() {
        assert_eq!(
            component_identity(raw(r#"{ "id": "c9", "name": "Card" }"#), 3),
            ("Card".to_string(), "c9".to_string())
        );
        assert_eq!(
            component_identity(raw(r#"{ "name": 4 }"#), 3),
            ("#3".to_string(), "#3".to_string())
        );
        assert_eq!(
            component_identity(raw("[1, 2]"), 0),
            ("#0".to_string(), "#0".to_string())
        );
    }
}
