//! # plaque_curator
//!
//! Curator - Component library documentation pipeline for Plaque.
//!
//! ## Name Origin
//!
//! A **curator** decides what goes on each museum plaque. Similarly,
//! `plaque_curator` takes a raw dump of a design tool's component library
//! and writes the plaque for every component: a navigable structure tree, a
//! property sheet, a flattened stylesheet, a design-token table and the
//! component's place in the dependency graph.
//!
//! ## Passes
//!
//! 1. **Lookup** ([`lookup`]): one forward pass over every component builds
//!    name, property and variant maps, the dependency graph and slugs.
//! 2. **Per component**: [`tree`], [`properties`], [`styles`], [`tokens`]
//!    and [`aggregate`] run independently for each component, in parallel
//!    when [`GenerateOptions::parallel`] is set.
//! 3. **Reverse dependencies**: `used_by` is filled in once every component
//!    has a name.
//!
//! [`docs`] then renders Markdown from the finished [`ComponentDoc`]s.
//!
//! ## Usage
//!
//! ```rust
//! use plaque_curator::{generate_from_json, GenerateOptions};
//! use plaque_curator::docs::render_component;
//!
//! let source = r#"{
//!   "_meta": { "componentCount": 1 },
//!   "breakpoints": { "main": { "label": "Desktop" } },
//!   "components": [{
//!     "id": "c1",
//!     "name": "Button",
//!     "properties": [{ "id": "p1", "label": "Label", "type": "text", "default": "Click" }],
//!     "render": { "tag": "button", "classes": ["btn"], "children": [{ "bind": "p1" }] },
//!     "classes": { "btn": { "css": "padding: 8px; color: white" } }
//!   }]
//! }"#;
//!
//! let output = generate_from_json(source, &GenerateOptions::default()).unwrap();
//! let doc = &output.docs[0];
//! assert_eq!(doc.slug, "button");
//! assert_eq!(doc.css, ".btn {\n  color: white;\n  padding: 8px;\n}");
//!
//! let markdown = render_component(doc);
//! assert!(markdown.contains("binds: Label"));
//! ```
//!
//! ## Failure model
//!
//! A malformed top level is a fatal [`ValidationError`]. Anything that goes
//! wrong inside one component becomes a [`ComponentFailure`] next to the
//! docs that did succeed.

pub mod aggregate;
pub mod docs;
pub mod lookup;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod properties;
pub mod styles;
pub mod tokens;
pub mod tree;
pub mod types;

// Re-exports for convenience
pub use docs::{render_component, render_index, DocBundle};
pub use lookup::Lookup;
pub use model::{
    ComponentDoc, DesignToken, DocStats, FieldKind, FieldSpec, GenerateOptions, GenerationOutput,
    NodeKind, PropertySection, SectionKind, TreeNode, VariantInfo,
};
pub use parse::parse_dump;
pub use pipeline::{generate_docs, generate_from_json};
pub use types::{ComponentFailure, DocError, ExtractorDump, RawComponent, ValidationError};
