//! Output model.
//!
//! Everything here is produced by a single pipeline run and never mutated
//! afterwards. All types serialize to camelCase JSON for viewers and the
//! persistence layer.

use crate::types::{ComponentFailure, VariantOption};
use plaque_carton::OrderedMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized documentation for one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    /// Batch-unique, kebab-case identifier
    pub slug: String,
    pub name: String,
    pub group: Option<String>,
    pub description: Option<String>,
    /// Normalized render tree
    pub tree: Option<TreeNode>,
    /// Property sheet, in display order
    pub sections: Vec<PropertySection>,
    /// Flattened stylesheet
    pub css: String,
    /// Variable token ids left unresolved in `css`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_unresolved: Vec<String>,
    pub tokens: Vec<DesignToken>,
    pub variants: Vec<VariantInfo>,
    /// Components rendered directly by this one
    pub contains: Vec<String>,
    /// Components that render this one directly
    pub used_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawPassthrough>,
    pub stats: DocStats,
}

impl ComponentDoc {
    /// Iterate every field across all sections.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Section of the given kind, if present.
    pub fn section(&self, kind: SectionKind) -> Option<&PropertySection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Kind of a normalized tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Element,
    Component,
    Slot,
    Binding,
}

/// A labeled node of the normalized render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub label: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Section kinds, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Variants,
    /// Named group taken from a `Group/Name` label
    Group,
    Slots,
    Visibility,
    Settings,
    Advanced,
}

impl SectionKind {
    /// Fixed title for non-group sections.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Variants => "Variants",
            Self::Group => "Group",
            Self::Slots => "Slots",
            Self::Visibility => "Visibility",
            Self::Settings => "Settings",
            Self::Advanced => "Advanced",
        }
    }
}

/// An ordered group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySection {
    pub title: String,
    pub kind: SectionKind,
    pub fields: Vec<FieldSpec>,
}

/// UI-agnostic field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Style,
    Segmented,
    Slot,
    Link,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Style => "style",
            Self::Segmented => "segmented",
            Self::Slot => "slot",
            Self::Link => "link",
        }
    }
}

/// Typed description of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Per-component unique field id
    pub id: String,
    pub property_id: String,
    pub label: String,
    pub kind: FieldKind,
    /// Source type tag, kept for reference
    pub type_tag: String,
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub bindable: bool,
}

/// Selectable value of a segmented or style field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Normalized link default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkValue {
    #[serde(rename = "type")]
    pub link_type: String,
    pub url: String,
    pub open_in: String,
    pub preload: String,
}

impl Default for LinkValue {
    fn default() -> Self {
        Self {
            link_type: "url".to_string(),
            url: "#".to_string(),
            open_in: "this".to_string(),
            preload: "default".to_string(),
        }
    }
}

/// Design token with its resolved values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignToken {
    pub id: String,
    pub name: String,
    /// Custom property name, e.g. `--Colors-Primary`
    pub css_name: String,
    /// Variable type tag (`color`, `length`, ...)
    pub kind: String,
    /// Default value, with alias hops spelled out
    pub value: String,
    /// Variant (or mode) name -> value
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub modes: OrderedMap<String>,
    /// Variable ids that could not be resolved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

/// Variant options of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    pub property_id: String,
    pub property_name: String,
    pub options: Vec<VariantOption>,
}

/// Untouched source JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPassthrough {
    pub render: Value,
    pub classes: Value,
    pub breakpoints: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Value>,
}

/// Summary counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocStats {
    pub property_count: usize,
    pub variant_count: usize,
    pub style_count: usize,
    pub token_count: usize,
}

/// Options for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Fan per-component work out over the rayon pool.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Attach [`RawPassthrough`] to every doc.
    #[serde(default = "default_true")]
    pub include_raw: bool,

    /// Deepest render tree accepted before the component fails.
    #[serde(default = "default_max_render_depth")]
    pub max_render_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            include_raw: true,
            max_render_depth: default_max_render_depth(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_render_depth() -> usize {
    256
}

/// Result of a pipeline run: best-effort, never all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub docs: Vec<ComponentDoc>,
    pub failures: Vec<ComponentFailure>,
}
