//! Input metrics and numeric coercion.
//!
//! RULE: field text is never rejected. Whatever the user typed is read
//! as the longest leading decimal number; anything unreadable is 0.

use crate::error::{GaugeError, GaugeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three input controls of the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    #[serde(alias = "days-since-visit")]
    Days,
    #[serde(alias = "average-spending")]
    Spending,
    #[serde(alias = "visit-frequency")]
    Frequency,
}

impl InputField {
    pub const ALL: [InputField; 3] = [InputField::Days, InputField::Spending, InputField::Frequency];

    pub fn as_str(self) -> &'static str {
        match self {
            InputField::Days      => "days",
            InputField::Spending  => "spending",
            InputField::Frequency => "frequency",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = GaugeError;

    fn from_str(s: &str) -> GaugeResult<Self> {
        match s {
            "days" | "days-since-visit"       => Ok(InputField::Days),
            "spending" | "average-spending"   => Ok(InputField::Spending),
            "frequency" | "visit-frequency"   => Ok(InputField::Frequency),
            other => Err(GaugeError::UnknownField { name: other.to_string() }),
        }
    }
}

/// Coerced inputs for one evaluation. Recreated on every change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub days:      f64,
    pub spending:  f64,
    pub frequency: f64,
}

impl Metrics {
    /// NaN components are replaced with 0.
    pub fn new(days: f64, spending: f64, frequency: f64) -> Self {
        Self {
            days:      coerce(days),
            spending:  coerce(spending),
            frequency: coerce(frequency),
        }
    }

    /// Build from raw field text, coercing each field independently.
    pub fn from_text(days: &str, spending: &str, frequency: &str) -> Self {
        Self {
            days:      coerce_text(days),
            spending:  coerce_text(spending),
            frequency: coerce_text(frequency),
        }
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Days      => self.days,
            InputField::Spending  => self.spending,
            InputField::Frequency => self.frequency,
        }
    }
}

/// Treat NaN (and negative zero) as 0. Every other value, including
/// negatives and infinities, is numeric and passes through.
pub fn coerce(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Read field text as a number: leading decimal prefix, else 0.
pub fn coerce_text(text: &str) -> f64 {
    match leading_number(text) {
        Some(v) => coerce(v),
        None => {
            log::trace!("metrics: non-numeric input {text:?} coerced to 0");
            0.0
        }
    }
}

/// Longest prefix of `text` (after leading whitespace and byte-order
/// marks) that reads as a decimal literal: `[+-]digits[.[digits]][e[+-]digits]`,
/// `[+-].digits[e[+-]digits]` or `[+-]Infinity`.
fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        // A bare trailing dot belongs to the mantissa ("5." and "1.e3").
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_number_and_ignores_the_rest() {
        assert_eq!(coerce_text("12abc"), 12.0);
        assert_eq!(coerce_text(" 7.5"), 7.5);
        assert_eq!(coerce_text("\t42\n"), 42.0);
        assert_eq!(coerce_text("3.14.15"), 3.14);
        assert_eq!(coerce_text("1e2"), 100.0);
        assert_eq!(coerce_text("1e"), 1.0);
        assert_eq!(coerce_text("2E-1x"), 0.2);
        assert_eq!(coerce_text("5."), 5.0);
        assert_eq!(coerce_text("1.e3"), 1000.0);
        assert_eq!(coerce_text("5.E-1x"), 0.5);
        assert_eq!(coerce_text("\u{feff}5"), 5.0);
        assert_eq!(coerce_text("\u{feff} \u{a0}9"), 9.0);
        assert_eq!(coerce_text(".5"), 0.5);
        assert_eq!(coerce_text("-3"), -3.0);
        assert_eq!(coerce_text("+8"), 8.0);
    }

    #[test]
    fn unreadable_text_is_zero() {
        assert_eq!(coerce_text(""), 0.0);
        assert_eq!(coerce_text("abc"), 0.0);
        assert_eq!(coerce_text("."), 0.0);
        assert_eq!(coerce_text("-"), 0.0);
        assert_eq!(coerce_text("e5"), 0.0);
        assert_eq!(coerce_text("NaN"), 0.0);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let v = coerce_text("-0");
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn infinity_is_numeric() {
        assert_eq!(coerce_text("Infinity"), f64::INFINITY);
        assert_eq!(coerce_text("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(coerce_text("1e999"), f64::INFINITY);
    }

    #[test]
    fn nan_components_become_zero() {
        let m = Metrics::new(f64::NAN, 200.0, f64::NAN);
        assert_eq!(m, Metrics { days: 0.0, spending: 200.0, frequency: 0.0 });
    }

    #[test]
    fn field_names_parse_with_dom_aliases() {
        assert_eq!("days".parse::<InputField>().unwrap(), InputField::Days);
        assert_eq!("average-spending".parse::<InputField>().unwrap(), InputField::Spending);
        assert!("colour".parse::<InputField>().is_err());

        let f: InputField = serde_json::from_str("\"visit-frequency\"").unwrap();
        assert_eq!(f, InputField::Frequency);
    }
}
