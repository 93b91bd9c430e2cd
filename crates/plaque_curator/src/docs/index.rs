//! Cross-component index page.

use super::{escape_cell, IndexOptions};
use crate::model::{ComponentDoc, FieldKind};
use crate::types::ComponentFailure;

/// Render the index page for a set of component docs.
#[inline]
pub fn render_index(docs: &[ComponentDoc]) -> String {
    render_index_with(docs, &[], &IndexOptions::default())
}

/// Render the index page, listing failures when there are any.
///
/// Creates a Markdown page with:
/// - Aggregate statistics
/// - Root, nested and leaf partitions of the dependency graph
/// - Quick-reference lists (slots, variants, links, tokens)
/// - A table of every component
pub fn render_index_with(
    docs: &[ComponentDoc],
    failures: &[ComponentFailure],
    options: &IndexOptions,
) -> String {
    let mut md = String::with_capacity(8192);

    // Title
    let title = options.title.as_deref().unwrap_or("Component Library");
    md.push_str("# ");
    md.push_str(title);
    md.push_str("\n\n");

    // Statistics
    let total = |f: fn(&ComponentDoc) -> usize| docs.iter().map(f).sum::<usize>();
    md.push_str(&format!(
        "> **{}** components, **{}** properties, **{}** variants, **{}** style blocks, **{}** design tokens\n\n",
        docs.len(),
        total(|d| d.stats.property_count),
        total(|d| d.stats.variant_count),
        total(|d| d.stats.style_count),
        total(|d| d.stats.token_count),
    ));

    // Dependency partitions
    let roots: Vec<_> = docs.iter().filter(|d| d.used_by.is_empty()).collect();
    let nested: Vec<_> = docs
        .iter()
        .filter(|d| !d.used_by.is_empty() && !d.contains.is_empty())
        .collect();
    let leaves: Vec<_> = docs
        .iter()
        .filter(|d| !d.used_by.is_empty() && d.contains.is_empty())
        .collect();

    md.push_str(&link_list("Root Components", &roots));
    md.push_str(&link_list("Nested Components", &nested));
    md.push_str(&link_list("Leaf Components", &leaves));

    // Quick reference
    let with_slots: Vec<_> = docs
        .iter()
        .filter(|d| d.fields().any(|f| f.kind == FieldKind::Slot))
        .collect();
    let with_variants: Vec<_> = docs.iter().filter(|d| !d.variants.is_empty()).collect();
    let with_links: Vec<_> = docs
        .iter()
        .filter(|d| d.fields().any(|f| f.kind == FieldKind::Link))
        .collect();
    let with_tokens: Vec<_> = docs.iter().filter(|d| !d.tokens.is_empty()).collect();

    md.push_str("## Quick Reference\n\n");
    md.push_str(&format!("- **Slots:** {}\n", inline_links(&with_slots)));
    md.push_str(&format!("- **Variants:** {}\n", inline_links(&with_variants)));
    md.push_str(&format!("- **Links:** {}\n", inline_links(&with_links)));
    md.push_str(&format!("- **Design tokens:** {}\n\n", inline_links(&with_tokens)));

    // All components
    md.push_str("## All Components\n\n");
    md.push_str("| Component | Group | Properties | Variants | Tokens | Used by |\n");
    md.push_str("|-----------|-------|------------|----------|--------|---------|\n");
    for doc in docs {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            link(doc),
            escape_cell(doc.group.as_deref().unwrap_or("-")),
            doc.stats.property_count,
            doc.stats.variant_count,
            doc.stats.token_count,
            doc.used_by.len(),
        ));
    }
    md.push('\n');

    if !failures.is_empty() {
        md.push_str("## Failures\n\n");
        md.push_str("| Component | Id | Error |\n");
        md.push_str("|-----------|----|-------|\n");
        for failure in failures {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&failure.component_name),
                escape_cell(&failure.component_id),
                escape_cell(&failure.message),
            ));
        }
        md.push('\n');
    }

    md
}

fn link(doc: &ComponentDoc) -> String {
    format!("[{}]({}.md)", escape_cell(&doc.name), doc.slug)
}

fn link_list(heading: &str, docs: &[&ComponentDoc]) -> String {
    if docs.is_empty() {
        return String::new();
    }

    let mut md = format!("## {}\n\n", heading);
    for doc in docs {
        md.push_str("- ");
        md.push_str(&link(doc));
        if let Some(description) = &doc.description {
            md.push_str(" - ");
            md.push_str(&escape_cell(description));
        }
        md.push('\n');
    }
    md.push('\n');
    md
}

fn inline_links(docs: &[&ComponentDoc]) -> String {
    if docs.is_empty() {
        return "None".to_string();
    }
    docs.iter().map(|d| link(d)).collect::<Vec<_>>().join(", ")
}
