//! Escape-wrapper stripping.
//!
//! `@raw<|` ... `|>` marks literal text. Wrappers nest, so matching closes
//! are found with a depth scanner rather than a pattern.

use memchr::memmem;
use std::borrow::Cow;

const OPEN: &[u8] = b"@raw<|";
const CLOSE: &[u8] = b"|>";

/// Unwrap every balanced escape wrapper, innermost levels included.
///
/// Openers without a matching close are left as they are. The result is a
/// fixpoint, so stripping twice gives the same text as stripping once.
pub fn strip_escape_wrappers(text: &str) -> Cow<'_, str> {
    let finder = memmem::Finder::new(OPEN);
    if finder.find(text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut current = text.to_string();
    loop {
        match strip_one_level(&current, &finder) {
            Some(next) => current = next,
            None => return Cow::Owned(current),
        }
    }
}

/// Remove one nesting level from every balanced wrapper.
/// Returns `None` when nothing changed.
fn strip_one_level(text: &str, finder: &memmem::Finder<'_>) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut changed = false;

    while let Some(offset) = finder.find(&bytes[pos..]) {
        let open = pos + offset;
        let inner_start = open + OPEN.len();

        match find_matching_close(bytes, inner_start) {
            Some(close) => {
                out.push_str(&text[pos..open]);
                out.push_str(&text[inner_start..close]);
                pos = close + CLOSE.len();
                changed = true;
            }
            None => {
                // Unmatched: keep the marker and look past it.
                out.push_str(&text[pos..inner_start]);
                pos = inner_start;
            }
        }
    }

    if !changed {
        return None;
    }
    out.push_str(&text[pos..]);
    Some(out)
}

/// Position of the close that balances an opener ending at `start`.
fn find_matching_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(OPEN) {
            depth += 1;
            i += OPEN.len();
        } else if rest.starts_with(CLOSE) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
            i += CLOSE.len();
        } else {
            i += 1;
        }
    }
    None
}
