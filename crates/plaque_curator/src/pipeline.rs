//! Documentation pipeline.
//!
//! Pass 1 builds the global [`Lookup`]. Pass 2 documents every component on
//! its own, fanned out over rayon when allowed and collected back in input
//! order. Pass 3 fills `used_by` once every component has been named, from
//! documented components only.

use crate::aggregate::{doc_stats, variant_info};
use crate::lookup::Lookup;
use crate::model::{ComponentDoc, GenerateOptions, GenerationOutput, RawPassthrough};
use crate::parse::parse_dump;
use crate::properties::classify_properties;
use crate::styles::{format_styles, CssContext};
use crate::tokens::resolve_tokens;
use crate::tree::{normalize_tree, TreeContext};
use crate::types::{ComponentFailure, DocError, ExtractorDump, RawComponent, ValidationError};
use plaque_carton::FxHashSet;
use rayon::prelude::*;

/// Parse a dump and document every component in it.
pub fn generate_from_json(
    source: &str,
    options: &GenerateOptions,
) -> Result<GenerationOutput, ValidationError> {
    let dump = parse_dump(source)?;
    Ok(generate_docs(&dump, options))
}

/// Document every component of a parsed dump.
///
/// Never fails as a whole: components that cannot be documented are
/// reported in [`GenerationOutput::failures`], after any the parser
/// already rejected.
pub fn generate_docs(dump: &ExtractorDump, options: &GenerateOptions) -> GenerationOutput {
    let lookup = Lookup::build(&dump.components);
    tracing::debug!(components = dump.components.len(), "pass 1 complete");

    let document = |(index, component): (usize, &RawComponent)| {
        document_component(index, component, dump, &lookup, options)
            .map_err(|err| ComponentFailure::from_error(component.display_name(), &component.id, &err))
    };

    let results: Vec<Result<ComponentDoc, ComponentFailure>> = if options.parallel {
        dump.components.par_iter().enumerate().map(document).collect()
    } else {
        dump.components.iter().enumerate().map(document).collect()
    };

    let mut docs = Vec::with_capacity(results.len());
    let mut failures = dump.rejected.clone();
    for result in results {
        match result {
            Ok(doc) => docs.push(doc),
            Err(failure) => {
                tracing::warn!(
                    component = %failure.component_name,
                    id = %failure.component_id,
                    "failed to document component: {}",
                    failure.message
                );
                failures.push(failure);
            }
        }
    }
    tracing::debug!(docs = docs.len(), failures = failures.len(), "pass 2 complete");

    let documented: FxHashSet<String> = docs.iter().map(|d| d.name.clone()).collect();
    for doc in &mut docs {
        doc.used_by = lookup
            .used_by(&doc.name)
            .iter()
            .filter(|name| documented.contains(name.as_str()))
            .cloned()
            .collect();
    }

    tracing::info!(
        docs = docs.len(),
        failures = failures.len(),
        "generated component documentation"
    );

    GenerationOutput { docs, failures }
}

/// Build the doc for the component at `index` (pass 2).
///
/// `used_by` is left empty; it is filled in by pass 3.
fn document_component(
    index: usize,
    component: &RawComponent,
    dump: &ExtractorDump,
    lookup: &Lookup,
    options: &GenerateOptions,
) -> Result<ComponentDoc, DocError> {
    let name = component.display_name();
    let properties = lookup.properties(index);
    let variant_values = lookup.variant_values(index);

    let tree_ctx = TreeContext {
        components: lookup,
        properties,
        max_depth: options.max_render_depth,
    };
    let tree = normalize_tree(component.render.as_ref(), &tree_ctx).map_err(|_| {
        DocError::RenderTooDeep {
            limit: options.max_render_depth,
        }
    })?;

    let sections = classify_properties(&component.properties, &component.variants);

    let css_ctx = CssContext {
        variables: &component.variables,
        variant_values,
        breakpoints: &dump.breakpoints,
    };
    let css = format_styles(&component.classes, &css_ctx);
    if !css.unresolved.is_empty() {
        tracing::warn!(component = %name, unresolved = ?css.unresolved, "unknown variable tokens in css");
    }

    let variant_names: Vec<String> = component
        .variants
        .values()
        .flatten()
        .map(|v| v.name.clone())
        .collect();
    let tokens = resolve_tokens(&component.variables, &variant_names);

    let variants = variant_info(&component.variants, properties);
    let stats = doc_stats(&sections, &variants, css.blocks, &tokens);

    let raw = options.include_raw.then(|| RawPassthrough {
        render: component.render_raw.clone(),
        classes: component.classes_raw.clone(),
        breakpoints: dump.breakpoints_raw.clone(),
        embeds: component.embeds.clone(),
    });

    Ok(ComponentDoc {
        slug: lookup.slug(index).to_string(),
        name: name.to_string(),
        group: component.group_name().map(str::to_string),
        description: component
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        tree,
        sections,
        css: css.text,
        css_unresolved: css.unresolved,
        tokens,
        variants,
        contains: lookup.contains(name).to_vec(),
        used_by: Vec::new(),
        raw,
        stats,
    })
}
