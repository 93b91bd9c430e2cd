//! Case conversion helpers.

/// Convert an arbitrary display name into kebab-case.
///
/// Word boundaries are any run of non-alphanumeric characters plus the
/// camelCase transitions (`buttonPrimary`, `HTMLButton`, `v2Button`).
///
/// ```
/// use plaque_carton::kebab_case;
///
/// assert_eq!(kebab_case("Primary Button"), "primary-button");
/// assert_eq!(kebab_case("HTMLButton"), "html-button");
/// ```
pub fn kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);
    let mut pending_sep = false;

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            pending_sep = true;
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower) {
                pending_sep = true;
            }
        }

        if pending_sep && !out.is_empty() {
            out.push('-');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }

    out
}

/// Turn a slash-separated variable path into a CSS identifier.
///
/// Path separators and whitespace become hyphens; letter case is kept so the
/// identifier still reads like the name a designer typed.
#[inline]
pub fn path_to_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c == '/' || c.is_whitespace() {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }
    out
}
