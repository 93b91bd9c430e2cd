//! Declaration list formatting.

use plaque_carton::{FxHashMap, FxHashSet};

/// Property name of the internal mode-switch declaration.
const MODE_SWITCH: &str = "@mode";

/// Format a declaration list into sorted, deduplicated lines.
///
/// Mode switches become a comment naming the variant they activate and are
/// listed first. Of exact duplicate declarations only the last occurrence is
/// kept. The rest are sorted by property name; declarations sharing a name
/// keep their source order.
pub(crate) fn format_declarations(
    css: &str,
    variant_values: &FxHashMap<String, String>,
) -> Vec<String> {
    let mut notes = Vec::new();
    let mut declarations = Vec::new();

    for fragment in split_declarations(css) {
        let (name, value) = match fragment.split_once(':') {
            Some((name, value)) => (collapse(name), collapse(value)),
            None => (collapse(&fragment), String::new()),
        };

        if name.eq_ignore_ascii_case(MODE_SWITCH) {
            let variant = variant_values
                .get(value.as_str())
                .map(String::as_str)
                .unwrap_or(value.as_str());
            let note = format!("/* Activates variant: {} */", variant);
            if !notes.contains(&note) {
                notes.push(note);
            }
            continue;
        }

        let line = if value.is_empty() {
            format!("{};", name)
        } else {
            format!("{}: {};", name, value)
        };
        declarations.push((name, line));
    }

    let mut seen = FxHashSet::default();
    let mut declarations: Vec<(String, String)> = declarations
        .into_iter()
        .rev()
        .filter(|(_, line)| seen.insert(line.clone()))
        .collect();
    declarations.reverse();
    declarations.sort_by(|a, b| a.0.cmp(&b.0));
    notes
        .into_iter()
        .chain(declarations.into_iter().map(|(_, line)| line))
        .collect()
}

/// Split on top-level `;`, dropping comments and empty fragments.
fn split_declarations(css: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = css.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                current.push(' ');
            }
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ';' if depth == 0 => fragments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fragments.push(current);

    fragments
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Collapse whitespace runs to single spaces.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
