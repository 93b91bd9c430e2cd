//! Stylesheet flattening.
//!
//! Every class of a component becomes one base block followed, after all
//! base blocks, by its variant overrides. Each CSS text goes through variable
//! substitution, escape-wrapper stripping and declaration formatting, in that
//! order. Formatting never fails: unknown tokens stay visible in the output
//! and classes with nothing to show are skipped.

mod declarations;
mod escape;
mod variables;

pub use escape::strip_escape_wrappers;
pub use variables::css_name;
pub(crate) use variables::{substitute_variables, token_ids};

use crate::types::{Breakpoint, RawCssClass, RawCssVariable};
use declarations::format_declarations;
use plaque_carton::{FxHashMap, FxHashSet, OrderedMap};

/// Breakpoint ids that apply without a media query.
const BASE_BREAKPOINTS: &[&str] = &["base", "main"];

/// Lookups needed to format one component's classes.
#[derive(Debug, Clone, Copy)]
pub struct CssContext<'a> {
    pub variables: &'a OrderedMap<RawCssVariable>,
    /// Variant option id -> display name
    pub variant_values: &'a FxHashMap<String, String>,
    pub breakpoints: &'a OrderedMap<Breakpoint>,
}

/// Flattened stylesheet of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedCss {
    pub text: String,
    /// Number of rule blocks in `text`
    pub blocks: usize,
    /// Variable ids referenced but not defined
    pub unresolved: Vec<String>,
}

/// Flatten a component's classes into one CSS text.
pub fn format_styles(classes: &OrderedMap<RawCssClass>, ctx: &CssContext<'_>) -> FormattedCss {
    let mut unresolved = Vec::new();
    let mut base_blocks = Vec::new();
    let mut variant_blocks = Vec::new();

    for (key, class) in classes.iter() {
        let selector = selector(key, class);

        let lines = declaration_lines(&class.css, ctx, &mut unresolved);
        if !lines.is_empty() {
            base_blocks.push(rule_block(&selector, &lines, ""));
        }

        for (variant_key, rule) in class.variants.iter() {
            let lines = declaration_lines(&rule.css, ctx, &mut unresolved);
            if lines.is_empty() {
                continue;
            }

            let variant_id = rule.variant.as_deref().unwrap_or(variant_key);
            let variant_name = ctx
                .variant_values
                .get(variant_id)
                .map(String::as_str)
                .unwrap_or(variant_id);

            let breakpoint = rule
                .breakpoint
                .as_deref()
                .filter(|bp| !BASE_BREAKPOINTS.contains(bp));
            let definition = breakpoint.and_then(|bp| ctx.breakpoints.get(bp));

            let mut block = match breakpoint {
                Some(bp) => {
                    let label = definition
                        .and_then(|d| d.label.as_deref())
                        .unwrap_or(bp);
                    format!("/* Variant: {} ({}) */\n", variant_name, label)
                }
                None => format!("/* Variant: {} */\n", variant_name),
            };

            match definition.and_then(Breakpoint::media_query) {
                Some(query) => {
                    block.push_str(&format!("@media {} {{\n", query));
                    block.push_str(&rule_block(&selector, &lines, "  "));
                    block.push_str("\n}");
                }
                None => block.push_str(&rule_block(&selector, &lines, "")),
            }

            variant_blocks.push(block);
        }
    }

    let mut seen = FxHashSet::default();
    let blocks: Vec<String> = base_blocks
        .into_iter()
        .chain(variant_blocks)
        .filter(|block| seen.insert(block.clone()))
        .collect();

    FormattedCss {
        blocks: blocks.len(),
        text: blocks.join("\n\n"),
        unresolved,
    }
}

fn selector(key: &str, class: &RawCssClass) -> String {
    let name = class
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(key);
    let combinator = class.combinator.as_deref().unwrap_or_default();

    if class.kind.as_deref() == Some("tag") {
        format!("{}{}", name, combinator)
    } else {
        format!(".{}{}", name, combinator)
    }
}

fn declaration_lines(
    css: &str,
    ctx: &CssContext<'_>,
    unresolved: &mut Vec<String>,
) -> Vec<String> {
    if css.trim().is_empty() {
        return Vec::new();
    }
    let substituted = substitute_variables(css, ctx.variables, unresolved);
    let stripped = strip_escape_wrappers(&substituted);
    format_declarations(&stripped, ctx.variant_values)
}

fn rule_block(selector: &str, lines: &[String], indent: &str) -> String {
    let mut out = format!("{}{} {{\n", indent, selector);
    for line in lines {
        out.push_str(indent);
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(indent);
    out.push('}');
    out
}
