//! General-purpose formatting helpers.

/// Format a number the way it would be written in a stylesheet.
///
/// Integral values drop the fractional part (`16.0` becomes `16`); everything
/// else uses the shortest round-trip representation.
#[inline]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
