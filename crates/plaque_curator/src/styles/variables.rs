//! Symbolic variable tokens (`@var_<id>`).

use crate::types::RawCssVariable;
use once_cell::sync::Lazy;
use plaque_carton::{path_to_ident, OrderedMap};
use regex::{Captures, Regex};
use std::borrow::Cow;

static VAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@var_([A-Za-z0-9_-]+)").unwrap());

/// Custom property name for a variable, e.g. `--Colors-Primary`.
#[inline]
pub fn css_name(variable: &RawCssVariable) -> String {
    format!("--{}", path_to_ident(&variable.name))
}

/// Ids of every variable token in `text`, in order of appearance.
pub(crate) fn token_ids(text: &str) -> impl Iterator<Item = &str> {
    VAR_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Replace known tokens with `var(--name)`.
///
/// Unknown tokens stay in the text and their ids are appended to `unknown`.
pub(crate) fn substitute_variables<'t>(
    text: &'t str,
    variables: &OrderedMap<RawCssVariable>,
    unknown: &mut Vec<String>,
) -> Cow<'t, str> {
    VAR_TOKEN.replace_all(text, |caps: &Captures<'_>| match variables.get(&caps[1]) {
        Some(variable) => format!("var({})", css_name(variable)),
        None => {
            if !unknown.iter().any(|id| id == &caps[1]) {
                unknown.push(caps[1].to_string());
            }
            caps[0].to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variables() -> OrderedMap<RawCssVariable> {
        serde_json::from_value(json!({
            "v-primary": { "name": "Colors/Primary", "type": "color" },
            "v-gap": { "name": "Spacing / Large Gap", "type": "length" }
        }))
        .unwrap()
    }

    #[test]
    fn test_substitution() {
        let mut unknown = Vec::new();
        let out = substitute_variables(
            "color: @var_v-primary; gap: @var_v-gap; border-color: @var_v-gone",
            &variables(),
            &mut unknown,
        );
        assert_eq!(
            out,
            "color: var(--Colors-Primary); gap: var(--Spacing-Large-Gap); border-color: @var_v-gone"
        );
        assert_eq!(unknown, vec!["v-gone"]);
    }

    #[test]
    fn test_no_tokens_borrowed() {
        let mut unknown = Vec::new();
        let out = substitute_variables("color: red", &variables(), &mut unknown);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_token_ids() {
        let ids: Vec<_> = token_ids("0 0 @var_a @var_b-2 rgba(@var_c_3)").collect();
        assert_eq!(ids, vec!["a", "b-2", "c_3"]);
    }
}
