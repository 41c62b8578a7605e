//! Coordinate values and the numeric coercions applied to untrusted input.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fractional digits written into the latitude/longitude inputs.
pub const FIELD_DECIMALS: usize = 13;

/// Fractional digits used when a point is shown in status text.
pub const STATUS_DECIMALS: usize = 6;

/// A latitude/longitude pair. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Returns `None` if either component is NaN or infinite.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }

    /// Build from pick-payload values (numbers or fully numeric strings).
    pub fn from_values(lat: &Value, lon: &Value) -> Option<Self> {
        Self::new(number_from_value(lat)?, number_from_value(lon)?)
    }

    /// Values for the latitude and longitude inputs.
    pub fn field_values(&self) -> (String, String) {
        (
            fixed(self.lat, FIELD_DECIMALS),
            fixed(self.lon, FIELD_DECIMALS),
        )
    }

    /// `lat, lon` with [`STATUS_DECIMALS`] digits.
    pub fn status_display(&self) -> String {
        let mut out = fixed(self.lat, STATUS_DECIMALS);
        let _ = write!(out, ", {}", fixed(self.lon, STATUS_DECIMALS));
        out
    }
}

/// Fractional digits needed to print any finite `f64` exactly.
const EXACT_DECIMALS: usize = 1074;

/// Fixed-point rendering with exactly `decimals` fractional digits.
///
/// Rounds exact ties away from zero and prints `-0.0` as zero, the way the
/// browser's `Number.prototype.toFixed` does.
pub fn fixed(value: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", EXACT_DECIMALS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut at = digits.len();
        loop {
            if at == 0 {
                digits.insert(0, b'1');
                break;
            }
            at -= 1;
            if digits[at] == b'9' {
                digits[at] = b'0';
            } else {
                digits[at] += 1;
                break;
            }
        }
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    // `-0.0 < 0.0` is false, so negative zero prints unsigned.
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| char::from(d)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| char::from(d)));
    }
    out
}

/// Strict coercion used for pick payloads.
///
/// Accepts JSON numbers and strings that are a number in their entirety
/// (surrounding whitespace allowed). `null`, booleans, empty strings and
/// anything non-finite are rejected.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Lenient coercion used for geocoder responses and the current input values.
///
/// Parses the longest numeric prefix after leading whitespace, so `"10.7 N"`
/// yields `10.7`. Returns `None` when there is no numeric prefix or the result
/// is not finite.
pub fn number_from_value_lenient(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
}

/// See [`number_from_value_lenient`].
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            mantissa_digits += frac_end - end - 1;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_start = end + 1 + sign;
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
