//! Locale-number coercion.
//!
//! Quantity and amount cells arrive as strings with comma thousands
//! separators. Anything that is not cleanly parseable coerces to 0 rather
//! than erroring; bad cells must never abort the pipeline.

use regex::Regex;
use std::sync::OnceLock;

/// Grouped digits: `1,234` / `12,345,678`, optional sign and fraction.
fn grouped_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d{1,3}(?:,\d{3})+(?:\.\d+)?$").unwrap())
}

/// Coerce a cell to a number. `"1,234"` → 1234.0, `""` → 0.0, and anything
/// malformed (misplaced separators included, e.g. `"12,34"`) → 0.0.
pub fn coerce(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    if s.contains(',') {
        if !grouped_number_re().is_match(s) {
            return 0.0;
        }
        return s
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}
