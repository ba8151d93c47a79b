//! Numeric Helpers

use crate::util::skip_leading_white;
use std::cmp::Ordering;

/// length of the number at the front of `x` : sign, digits, optional fraction,
/// optional exponent. Zero if there is no number there.
fn num_prefix_len(x: &[u8]) -> usize {
    let digits = |from: usize| x[from..].iter().take_while(|c| c.is_ascii_digit()).count();
    let mut pos = usize::from(matches!(x.first(), Some(b'+' | b'-')));
    let whole = digits(pos);
    pos += whole;
    let mut frac = 0;
    if x.get(pos) == Some(&b'.') {
        frac = digits(pos + 1);
        if whole + frac > 0 {
            pos += 1 + frac;
        }
    }
    if whole + frac == 0 {
        return 0;
    }
    if matches!(x.get(pos), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(x.get(pos + 1), Some(b'+' | b'-')));
        let exp = digits(pos + 1 + sign);
        if exp > 0 {
            pos += 1 + sign + exp;
        }
    }
    pos
}

/// Parse a column as floating point.
/// Leading whitespace is skipped, then the longest number found there is used,
/// and anything after it is ignored, so `12abc` is 12.
/// None if the column does not start with a number.
#[must_use]
pub fn parse_f64(field: &[u8]) -> Option<f64> {
    let x = skip_leading_white(field);
    let len = num_prefix_len(x);
    if len == 0 {
        return None;
    }
    std::str::from_utf8(&x[..len]).ok()?.parse::<f64>().ok()
}

/// Value of a column for sorting. Junk sorts as if it were infinitely large.
#[must_use]
pub fn f64_value(field: &[u8]) -> f64 {
    parse_f64(field).unwrap_or(f64::INFINITY)
}

/// ordering for f64. Zero and negative zero are equal.
#[must_use]
pub fn fcmp(x: f64, y: f64) -> Ordering {
    if x == y {
        return Ordering::Equal;
    }
    if x > y {
        return Ordering::Greater;
    }
    Ordering::Less
}
