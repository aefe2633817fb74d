//! Amount and date normalisation for statement tokens.
//!
//! Both normalisers are total: bad input degrades to a safe default
//! (`0.0` or the raw text) instead of an error.

use chrono::NaiveDate;

/// Date layouts accepted on statement lines, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Canonical output layout for dates.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert an amount token to a signed float.
///
/// Thousands separators are dropped and a token wrapped in parentheses is
/// negative: `"(1,234.50)"` becomes `-1234.5`. Text that is not a finite
/// number yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "");
    let mut s = cleaned.trim();
    if s.is_empty() {
        return 0.0;
    }

    let negative = s.starts_with('(') && s.ends_with(')');
    if negative {
        s = &s[1..s.len() - 1];
    }

    let value = match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    };

    if negative {
        -value
    } else {
        value
    }
}

/// Parse a date token with the first matching layout in [`DATE_FORMATS`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Normalise a date token to `YYYY-MM-DD`, passing unparsable text through trimmed.
pub fn normalize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format(OUTPUT_DATE_FORMAT).to_string(),
        None => raw.trim().to_string(),
    }
}
