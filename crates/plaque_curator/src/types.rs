//! Type definitions for the extractor dump.
//!
//! This module contains the data structures for the raw input produced by
//! the design-tool extractor: the component list, property schemas, render
//! trees, style classes and design variables.
//!
//! Object maps keep document order ([`OrderedMap`]) because class order and
//! variant option order are meaningful downstream.

use plaque_carton::OrderedMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed extractor dump.
#[derive(Debug, Clone, Default)]
pub struct ExtractorDump {
    /// `_meta` block, if the producer sent one
    pub meta: DumpMeta,

    /// Breakpoint id -> definition
    pub breakpoints: OrderedMap<Breakpoint>,

    /// Untouched `breakpoints` JSON for full-fidelity consumers
    pub breakpoints_raw: Value,

    /// Components that decoded successfully, in input order
    pub components: Vec<RawComponent>,

    /// Components that could not be decoded
    pub rejected: Vec<ComponentFailure>,
}

/// Producer metadata from the `_meta` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpMeta {
    /// Number of components the producer believes it exported
    #[serde(default)]
    pub component_count: Option<usize>,

    #[serde(default)]
    pub site_name: Option<String>,

    #[serde(default)]
    pub exported_at: Option<String>,
}

/// Breakpoint definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Human-readable label (e.g. "Tablet")
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub min_width: Option<u32>,

    #[serde(default)]
    pub max_width: Option<u32>,
}

impl Breakpoint {
    /// Media query condition for this breakpoint, if it has any bounds.
    pub fn media_query(&self) -> Option<String> {
        match (self.min_width, self.max_width) {
            (Some(min), Some(max)) => Some(format!(
                "(min-width: {}px) and (max-width: {}px)",
                min, max
            )),
            (Some(min), None) => Some(format!("(min-width: {}px)", min)),
            (None, Some(max)) => Some(format!("(max-width: {}px)", max)),
            (None, None) => None,
        }
    }
}

/// A single component definition from the dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    /// Stable identifier
    pub id: String,

    /// Display name (falls back to `id` when absent)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Property schema
    #[serde(default)]
    pub properties: Vec<RawProperty>,

    /// Root of the render tree
    #[serde(default)]
    pub render: Option<RenderNode>,

    /// Class name -> style class
    #[serde(default)]
    pub classes: OrderedMap<RawCssClass>,

    /// Variable id -> design variable
    #[serde(default)]
    pub variables: OrderedMap<RawCssVariable>,

    /// Property id -> variant options
    #[serde(default)]
    pub variants: OrderedMap<Vec<VariantOption>>,

    /// Embedded content, passed through untouched
    #[serde(default)]
    pub embeds: Vec<Value>,

    /// Untouched `render` JSON
    #[serde(skip)]
    pub render_raw: Value,

    /// Untouched `classes` JSON
    #[serde(skip)]
    pub classes_raw: Value,
}

impl RawComponent {
    /// Display name, falling back to the id.
    #[inline]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    /// Group name, treating blank groups as absent.
    #[inline]
    pub fn group_name(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Property descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    pub id: String,

    /// Label, optionally `Group/Name`
    #[serde(default)]
    pub label: Option<String>,

    /// Semantic type tag (e.g. `text`, `style-variant`, `link`)
    #[serde(rename = "type", default)]
    pub type_tag: String,

    /// Untyped default; its shape depends on `type_tag`
    #[serde(default)]
    pub default: Value,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub tooltip: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub bindable: bool,

    #[serde(default)]
    pub is_default: bool,
}

impl RawProperty {
    /// Full label, falling back to the id.
    #[inline]
    pub fn full_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }

    /// Split the label into `(group, name)`.
    ///
    /// `"Layout/Gap"` becomes `(Some("Layout"), "Gap")`; a label without a
    /// separator (or with an empty group part) has no group.
    pub fn split_label(&self) -> (Option<&str>, &str) {
        let label = self.full_label();
        match label.split_once('/') {
            Some((group, name)) if !group.trim().is_empty() && !name.trim().is_empty() => {
                (Some(group.trim()), name.trim())
            }
            _ => (None, label),
        }
    }
}

/// A selectable variant option for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: String,
    pub name: String,
}

/// A node in a component's render tree.
///
/// The dump distinguishes shapes only by which fields are present; the
/// decision is made once here, while decoding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RenderNodeRepr")]
pub enum RenderNode {
    /// Stands in for a property or slot value.
    Binding(Binding),
    /// Literal element or nested component instance.
    Element(Box<Element>),
}

/// Reference to a property or slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Property or slot id
    #[serde(rename = "bind")]
    pub id: String,

    /// Resolved property display name
    #[serde(default)]
    pub name: Option<String>,

    /// Resolved slot display name, present when the binding targets a slot
    #[serde(default)]
    pub slot_name: Option<String>,
}

/// Element node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Producer-side node type, used as a last-resort label
    pub node_type: Option<String>,
    pub tag: Option<String>,
    /// Set when the node instantiates another component
    pub component: Option<ComponentRef>,
    /// Style class references
    pub classes: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub is_text: bool,
    /// Slot name when the node is a slot placeholder
    pub slot: Option<String>,
    pub display_name: Option<String>,
    pub children: Vec<RenderNode>,
}

/// Reference to a nested component instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Element attribute; either side may be bound to a property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    pub name: AttrPart,
    #[serde(default)]
    pub value: Option<AttrPart>,
}

/// Attribute name or value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrPart {
    Bound(Binding),
    Literal(String),
    Other(Value),
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RenderNodeRepr {
    bind: Option<String>,
    name: Option<String>,
    slot_name: Option<String>,
    #[serde(rename = "type")]
    node_type: Option<String>,
    tag: Option<String>,
    component: Option<ComponentRef>,
    classes: Option<Vec<String>>,
    attributes: Option<Vec<Attribute>>,
    text: Option<bool>,
    slot: Option<String>,
    display_name: Option<String>,
    children: Option<Vec<RenderNode>>,
}

impl From<RenderNodeRepr> for RenderNode {
    fn from(repr: RenderNodeRepr) -> Self {
        if let Some(id) = repr.bind {
            return RenderNode::Binding(Binding {
                id,
                name: repr.name,
                slot_name: repr.slot_name,
            });
        }

        RenderNode::Element(Box::new(Element {
            node_type: repr.node_type,
            tag: repr.tag,
            component: repr.component,
            classes: repr.classes.unwrap_or_default(),
            attributes: repr.attributes.unwrap_or_default(),
            is_text: repr.text.unwrap_or(false),
            slot: repr.slot,
            display_name: repr.display_name.or(repr.name),
            children: repr.children.unwrap_or_default(),
        }))
    }
}

/// Style class with base declarations and overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCssClass {
    /// Class name (falls back to the map key)
    #[serde(default)]
    pub name: Option<String>,

    /// `class` (default) or `tag`
    #[serde(default)]
    pub kind: Option<String>,

    /// Selector suffix such as `:hover`
    #[serde(default)]
    pub combinator: Option<String>,

    /// Base declarations
    #[serde(default)]
    pub css: String,

    /// Variant key -> override
    #[serde(default)]
    pub variants: OrderedMap<CssVariantRule>,
}

/// Per-breakpoint / per-variant override of a class.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CssVariantRule {
    #[serde(default)]
    pub breakpoint: Option<String>,

    /// Variant option id
    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub css: String,
}

/// Design variable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCssVariable {
    /// Path-like name, e.g. `Colors/Primary`
    pub name: String,

    /// `color`, `length`, `number`, `raw`, ...
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub value: Option<VariableValue>,

    /// Mode name -> override
    #[serde(default)]
    pub modes: OrderedMap<VariableValue>,
}

/// Value of a design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariableValue {
    Color {
        value: String,
    },
    Length {
        value: f64,
        #[serde(default = "default_unit")]
        unit: String,
    },
    Number {
        value: f64,
    },
    /// Alias of another variable
    Ref {
        #[serde(rename = "variableId")]
        variable_id: String,
    },
    /// Raw text, possibly with embedded `@var_` tokens
    Raw {
        value: String,
    },
}

fn default_unit() -> String {
    "px".to_string()
}

/// A component that could not be documented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFailure {
    pub component_name: String,
    pub component_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ComponentFailure {
    /// Build a failure record from any error, keeping its source chain.
    pub fn from_error(
        name: impl Into<String>,
        id: impl Into<String>,
        error: &(dyn std::error::Error + 'static),
    ) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            component_name: name.into(),
            component_id: id.into(),
            message: error.to_string(),
            stack: if chain.is_empty() {
                None
            } else {
                Some(chain.join("\ncaused by: "))
            },
        }
    }
}

/// Fatal problem with the top-level shape of the dump.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input must be a JSON object")]
    NotAnObject,

    #[error("missing required top-level field `{0}`")]
    MissingField(&'static str),

    #[error("`components` must be an array")]
    ComponentsNotArray,

    #[error("`components` is empty")]
    NoComponents,

    #[error("first component is missing `{0}`")]
    FirstComponentIncomplete(&'static str),

    #[error("`breakpoints` is malformed: {0}")]
    Breakpoints(#[source] serde_json::Error),
}

/// Non-fatal problem with a single component.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("component could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("render tree exceeds the maximum depth of {limit}")]
    RenderTooDeep { limit: usize },

    #[error("component exceeds the maximum JSON nesting of {limit}")]
    NestingTooDeep { limit: usize },
}
