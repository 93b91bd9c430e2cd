//! Type tag families.
//!
//! The dump's type tags are free-form strings; every known spelling maps to
//! one family, unknown tags fall back to [`TypeFamily::Text`].

use crate::model::FieldKind;
use phf::phf_map;

/// Semantic family of a property type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Text,
    RichText,
    Number,
    Boolean,
    Choice,
    StyleVariant,
    Slot,
    Link,
    Visibility,
}

static TYPE_FAMILIES: phf::Map<&'static str, TypeFamily> = phf_map! {
    "text" => TypeFamily::Text,
    "plain-text" => TypeFamily::Text,
    "string" => TypeFamily::Text,
    "image" => TypeFamily::Text,
    "color" => TypeFamily::Text,
    "id" => TypeFamily::Text,
    "rich-text" => TypeFamily::RichText,
    "richtext" => TypeFamily::RichText,
    "list" => TypeFamily::RichText,
    "number" => TypeFamily::Number,
    "boolean" => TypeFamily::Boolean,
    "switch" => TypeFamily::Boolean,
    "option" => TypeFamily::Choice,
    "enum" => TypeFamily::Choice,
    "style-variant" => TypeFamily::StyleVariant,
    "variant" => TypeFamily::StyleVariant,
    "slot" => TypeFamily::Slot,
    "link" => TypeFamily::Link,
    "visibility-conditions" => TypeFamily::Visibility,
    "visibility" => TypeFamily::Visibility,
};

impl TypeFamily {
    /// Family of a raw type tag (case-insensitive, `_` treated as `-`).
    pub fn of(type_tag: &str) -> Self {
        let normalized = type_tag.trim().to_ascii_lowercase().replace('_', "-");
        TYPE_FAMILIES
            .get(normalized.as_str())
            .copied()
            .unwrap_or(TypeFamily::Text)
    }

    /// Field kind used to present this family.
    pub const fn field_kind(self) -> FieldKind {
        match self {
            Self::Text | Self::RichText | Self::Number => FieldKind::Text,
            Self::StyleVariant => FieldKind::Style,
            Self::Boolean | Self::Choice | Self::Visibility => FieldKind::Segmented,
            Self::Slot => FieldKind::Slot,
            Self::Link => FieldKind::Link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert_eq!(TypeFamily::of("style-variant"), TypeFamily::StyleVariant);
        assert_eq!(TypeFamily::of("Visibility_Conditions"), TypeFamily::Visibility);
        assert_eq!(TypeFamily::of("rich-text"), TypeFamily::RichText);
        assert_eq!(TypeFamily::of("something-new"), TypeFamily::Text);
        assert_eq!(TypeFamily::of(""), TypeFamily::Text);
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(TypeFamily::Number.field_kind(), FieldKind::Text);
        assert_eq!(TypeFamily::Visibility.field_kind(), FieldKind::Segmented);
        assert_eq!(TypeFamily::Link.field_kind(), FieldKind::Link);
    }
}
