//! Design token resolution.
//!
//! Resolution runs in two passes over the component's variable table:
//!
//! 1. A breadth-first worklist classifies every reachable variable id into a
//!    [`Step`]: a literal, an alias of another id, raw text, or missing.
//! 2. Each token's default and per-mode values follow their alias chain to a
//!    literal. Every hop is spelled out as `var(--name)` so the chain stays
//!    traceable, and a visited set stops cycles.
//!
//! Nothing here fails. A chain that cannot end in a literal ends in an
//! `unresolved(<id>)` marker and the id is recorded on the token.

use crate::model::DesignToken;
use crate::styles::{css_name, substitute_variables, token_ids};
use crate::types::{RawCssVariable, VariableValue};
use plaque_carton::{format_number, FxHashMap, FxHashSet, OrderedMap};
use std::collections::VecDeque;

/// Classified value of one variable.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Literal(String),
    Alias(String),
    Raw(String),
    /// The variable exists but carries no value.
    Missing(String),
}

/// Classify a value, returning the ids it depends on.
fn classify(value: &VariableValue) -> (Step, Vec<String>) {
    match value {
        VariableValue::Color { value } => (Step::Literal(value.trim().to_string()), Vec::new()),
        VariableValue::Length { value, unit } => {
            (Step::Literal(format!("{}{}", format_number(*value), unit)), Vec::new())
        }
        VariableValue::Number { value } => (Step::Literal(format_number(*value)), Vec::new()),
        VariableValue::Ref { variable_id } => {
            (Step::Alias(variable_id.clone()), vec![variable_id.clone()])
        }
        VariableValue::Raw { value } => (
            Step::Raw(value.clone()),
            token_ids(value).map(str::to_string).collect(),
        ),
    }
}

struct Resolver<'a> {
    variables: &'a OrderedMap<RawCssVariable>,
    steps: FxHashMap<String, Step>,
}

impl<'a> Resolver<'a> {
    /// Pass 1: classify every id reachable from the table.
    fn new(variables: &'a OrderedMap<RawCssVariable>) -> Self {
        let mut queue: VecDeque<String> = variables.keys().cloned().collect();
        for variable in variables.values() {
            for value in variable.modes.values() {
                queue.extend(classify(value).1);
            }
        }

        let mut steps: FxHashMap<String, Step> = FxHashMap::default();
        while let Some(id) = queue.pop_front() {
            if steps.contains_key(&id) {
                continue;
            }
            // Ids missing from the table are reported when a chain reaches them.
            let Some(variable) = variables.get(&id) else {
                continue;
            };

            let step = match &variable.value {
                Some(value) => {
                    let (step, deps) = classify(value);
                    queue.extend(deps.into_iter().filter(|d| !steps.contains_key(d)));
                    step
                }
                None => Step::Missing(id.clone()),
            };
            steps.insert(id, step);
        }

        Self { variables, steps }
    }

    /// Pass 2: render a value chain starting at `first`.
    fn render(&self, first: &Step, origin: &str, unresolved: &mut Vec<String>) -> String {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        visited.insert(origin);
        let mut hops: Vec<String> = Vec::new();
        let mut step = first;

        let tail = loop {
            match step {
                Step::Literal(value) => break value.clone(),
                Step::Raw(text) => {
                    let mut unknown = Vec::new();
                    let expanded = substitute_variables(text, self.variables, &mut unknown);
                    for id in unknown {
                        note_unresolved(unresolved, &id);
                    }
                    break expanded.into_owned();
                }
                Step::Missing(id) => {
                    note_unresolved(unresolved, id);
                    break format!("unresolved({})", id);
                }
                Step::Alias(target) => {
                    let next = self.variables.get(target).zip(self.steps.get(target));
                    let Some((variable, next)) = next else {
                        note_unresolved(unresolved, target);
                        break format!("unresolved({})", target);
                    };
                    if !visited.insert(target.as_str()) {
                        note_unresolved(unresolved, target);
                        break format!("unresolved({})", target);
                    }
                    hops.push(format!("var({})", css_name(variable)));
                    step = next;
                }
            }
        };

        hops.push(tail);
        hops.join(" → ")
    }
}

fn note_unresolved(unresolved: &mut Vec<String>, id: &str) {
    if !unresolved.iter().any(|u| u == id) {
        unresolved.push(id.to_string());
    }
}

/// Human name for a mode: strip a `Mode` suffix and match the rest against
/// the component's variant names. Unmatched modes keep their full name.
pub fn mode_label(mode: &str, variant_names: &[String]) -> String {
    let trimmed = mode.trim();
    let stem = match trimmed.len().checked_sub(4).and_then(|at| trimmed.get(at..).map(|s| (at, s))) {
        Some((at, suffix)) if suffix.eq_ignore_ascii_case("mode") => &trimmed[..at],
        _ => trimmed,
    };
    let stem = stem.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/' | ':'));

    if stem.is_empty() {
        return trimmed.to_string();
    }

    variant_names
        .iter()
        .find(|name| name.trim().eq_ignore_ascii_case(stem))
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Resolve a component's variables into design tokens, in table order.
pub fn resolve_tokens(
    variables: &OrderedMap<RawCssVariable>,
    variant_names: &[String],
) -> Vec<DesignToken> {
    if variables.is_empty() {
        return Vec::new();
    }

    let resolver = Resolver::new(variables);
    let mut tokens = Vec::with_capacity(variables.len());

    for (id, variable) in variables.iter() {
        let mut unresolved = Vec::new();

        let value = match resolver.steps.get(id) {
            Some(step) => resolver.render(step, id, &mut unresolved),
            None => {
                note_unresolved(&mut unresolved, id);
                format!("unresolved({})", id)
            }
        };

        let mut modes: OrderedMap<String> = OrderedMap::default();
        for (mode, mode_value) in variable.modes.iter() {
            let label = mode_label(mode, variant_names);
            if modes.contains_key(&label) {
                continue;
            }
            let (step, _) = classify(mode_value);
            modes.insert(label, resolver.render(&step, id, &mut unresolved));
        }

        tokens.push(DesignToken {
            id: id.to_string(),
            name: variable.name.clone(),
            css_name: css_name(variable),
            kind: variable.kind.clone(),
            value,
            modes,
            unresolved,
        });
    }

    let unresolved: usize = tokens.iter().map(|t| t.unresolved.len()).sum();
    if unresolved > 0 {
        tracing::debug!(tokens = tokens.len(), unresolved, "tokens with unresolved references");
    }

    tokens
}
