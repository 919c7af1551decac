use contracts::domain::a001_sales_record::FieldValue;

/// Coerces a raw cell to a number.
///
/// Comma-grouped strings (`"1,234,567"`) are numbers; a string that does not
/// parse as a whole falls back to its leading numeric part (`"1,200円"` → 1200).
/// Anything else, including blanks and error markers, is 0. Never NaN or ∞.
pub fn to_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(n) if n.is_finite() => *n,
        FieldValue::Number(_) | FieldValue::Empty => 0.0,
        FieldValue::Text(s) => parse_text(s).unwrap_or(0.0),
    }
}

/// `true` for a non-blank text cell that is not a clean number,
/// e.g. `#VALUE!`, `ERROR`, `12a`.
pub fn is_malformed(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(s) => {
            let cleaned = strip_grouping(s);
            !cleaned.is_empty() && parse_whole(&cleaned).is_none()
        }
        FieldValue::Number(n) => !n.is_finite(),
        FieldValue::Empty => false,
    }
}

/// Month number 1..=12, `None` for anything else.
pub fn to_month(value: &FieldValue) -> Option<u32> {
    let n = to_number(value).trunc();
    (1.0..=12.0).contains(&n).then_some(n as u32)
}

/// Positive year, `None` when missing or not a number.
pub fn to_year(value: &FieldValue) -> Option<i32> {
    let n = to_number(value).trunc();
    (n >= 1.0 && n <= i32::MAX as f64).then_some(n as i32)
}

/// Ratio guarded against an empty denominator.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn strip_grouping(s: &str) -> String {
    s.trim().chars().filter(|c| *c != ',').collect()
}

fn parse_text(s: &str) -> Option<f64> {
    let cleaned = strip_grouping(s);
    if cleaned.is_empty() {
        return None;
    }
    parse_whole(&cleaned).or_else(|| leading_number(&cleaned))
}

fn parse_whole(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest `[+-]digits[.digits]` prefix.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }
    parse_whole(&s[..end])
}
