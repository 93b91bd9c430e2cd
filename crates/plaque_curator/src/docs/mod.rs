//! Markdown rendering of component docs.
//!
//! Everything here is a pure function of its input: one page per
//! [`ComponentDoc`] plus a cross-component index. [`DocBundle`] packages the
//! pages with content hashes so writers can skip unchanged files.
//!
//! # Example
//!
//! ```rust
//! use plaque_curator::docs::{render_component, render_index};
//! use plaque_curator::{generate_from_json, GenerateOptions};
//!
//! let source = r#"{
//!   "breakpoints": {},
//!   "components": [
//!     { "id": "c1", "name": "Button", "render": { "tag": "button" }, "properties": [] }
//!   ]
//! }"#;
//!
//! let output = generate_from_json(source, &GenerateOptions::default()).unwrap();
//! let page = render_component(&output.docs[0]);
//! assert!(page.starts_with("# Button\n"));
//! assert!(render_index(&output.docs).contains("[Button](button.md)"));
//! ```

mod index;
mod markdown;

pub use index::{render_index, render_index_with};
pub use markdown::render_component;

use crate::model::ComponentDoc;
use crate::types::ComponentFailure;
use plaque_carton::content_hash;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Options for the index page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexOptions {
    /// Custom title for the index.
    #[serde(default)]
    pub title: Option<String>,
}

/// One rendered Markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFile {
    /// Suggested filename, e.g. `button.md`
    pub filename: String,

    /// Generated Markdown content.
    pub markdown: String,

    /// Hash of `markdown`, for change detection.
    pub content_hash: String,
}

impl DocFile {
    fn new(filename: String, markdown: String) -> Self {
        let content_hash = content_hash(&markdown);
        Self {
            filename,
            markdown,
            content_hash,
        }
    }
}

/// Every page of a documentation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocBundle {
    /// One page per component, in input order.
    pub components: Vec<DocFile>,

    /// `README.md` index page.
    pub index: DocFile,
}

impl DocBundle {
    /// Render all pages.
    pub fn build(docs: &[ComponentDoc], failures: &[ComponentFailure], options: &IndexOptions) -> Self {
        let components = docs
            .par_iter()
            .map(|doc| DocFile::new(format!("{}.md", doc.slug), render_component(doc)))
            .collect();

        let index = DocFile::new(
            "README.md".to_string(),
            render_index_with(docs, failures, options),
        );

        Self { components, index }
    }

    /// All files, index last.
    pub fn files(&self) -> impl Iterator<Item = &DocFile> {
        self.components.iter().chain(std::iter::once(&self.index))
    }
}

/// Escape free text for a Markdown table cell.
pub fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.trim().chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '|' => out.push_str("\\|"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("<br>");
            }
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

/// Join names for a list cell, or `None` when there are none.
pub(crate) fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}
