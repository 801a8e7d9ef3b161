//! Formatted values and alignment padding.
//!
//! Numeric values honour a .NET-style standard format string:
//!
//! | spec   | meaning                                   | example (`1234.5`) |
//! |--------|-------------------------------------------|--------------------|
//! | `D4`   | integer, zero padded                      | `0042` for `42`    |
//! | `X4`   | hexadecimal, upper case (`x` lower case)  | `00FF` for `255`   |
//! | `N2`   | grouped, fixed decimals                   | `1,234.50`         |
//! | `F3`   | fixed decimals                            | `1234.500`         |
//! | `E2`   | scientific                                | `1.23E+003`        |
//! | `G`    | shortest round-trip spelling              | `1234.5`           |
//!
//! Unknown or inapplicable specs fall back to the default spelling, and so
//! does a precision above 99.

use std::hash::{Hash, Hasher};

use serde::Deserialize;

/// Separators used when formatting numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatLocale {
    pub decimal_separator: char,
    pub group_separator: char,
    pub negative_sign: String,
}

impl FormatLocale {
    /// Culture-neutral separators (`.` and `,`).
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            negative_sign: "-".to_string(),
        }
    }
}

impl Default for FormatLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Payload of a formatted part.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value, rendered as the empty string.
    None,
    Bool(bool),
    Char(char),
    Int(i128),
    UInt(u128),
    Float(f64),
    Text(String),
}

impl Value {
    /// Capture any displayable value by its default string form.
    pub fn display(value: impl std::fmt::Display) -> Self {
        Value::Text(value.to_string())
    }

    /// Render with an optional format string.
    pub fn format(&self, format: Option<&str>, locale: &FormatLocale) -> String {
        let spec = format.and_then(NumberFormat::parse);
        match self {
            Value::None => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Char(c) => c.to_string(),
            Value::Text(s) => s.clone(),
            Value::Int(i) => format_integer(*i < 0, i.unsigned_abs(), spec, locale),
            Value::UInt(u) => format_integer(false, *u, spec, locale),
            Value::Float(f) => format_float(*f, spec, locale),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::None => {}
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Int(i) => i.hash(state),
            Value::UInt(u) => u.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident => $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from!(Int => i8, i16, i32, i64, i128);
impl_from!(UInt => u8, u16, u32, u64, u128);
impl_from!(Float => f32, f64);
impl_from!(Bool => bool);
impl_from!(Char => char);
impl_from!(Text => String, &str);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i128)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u128)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// Pad to `|alignment|` characters: right-justified when positive,
/// left-justified when negative.
pub(crate) fn align(text: &str, alignment: Option<i32>) -> String {
    let Some(alignment) = alignment else {
        return text.to_string();
    };
    let width = alignment.unsigned_abs() as usize;
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let padding = " ".repeat(width - len);
    if alignment < 0 {
        format!("{text}{padding}")
    } else {
        format!("{padding}{text}")
    }
}

/// Largest precision a format string may carry; larger ones are unknown specs.
const MAX_PRECISION: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberFormat {
    Decimal(Option<usize>),
    Hex { upper: bool, digits: Option<usize> },
    Grouped(Option<usize>),
    Fixed(Option<usize>),
    Scientific { upper: bool, digits: Option<usize> },
    General,
}

impl NumberFormat {
    fn parse(spec: &str) -> Option<Self> {
        let mut chars = spec.chars();
        let letter = chars.next()?;
        let rest = chars.as_str();
        let precision = if rest.is_empty() {
            None
        } else {
            Some(rest.parse::<usize>().ok().filter(|p| *p <= MAX_PRECISION)?)
        };
        let format = match letter {
            'D' | 'd' => NumberFormat::Decimal(precision),
            'X' => NumberFormat::Hex {
                upper: true,
                digits: precision,
            },
            'x' => NumberFormat::Hex {
                upper: false,
                digits: precision,
            },
            'N' | 'n' => NumberFormat::Grouped(precision),
            'F' | 'f' => NumberFormat::Fixed(precision),
            'E' | 'e' => NumberFormat::Scientific {
                upper: letter == 'E',
                digits: precision,
            },
            'G' | 'g' => NumberFormat::General,
            _ => return None,
        };
        Some(format)
    }
}

fn signed(negative: bool, body: String, locale: &FormatLocale) -> String {
    if negative {
        format!("{}{body}", locale.negative_sign)
    } else {
        body
    }
}

fn zero_pad(digits: String, width: Option<usize>) -> String {
    match width {
        Some(width) if digits.len() < width => {
            format!("{}{digits}", "0".repeat(width - digits.len()))
        }
        _ => digits,
    }
}

fn group(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn with_decimals(integer: String, decimals: usize, locale: &FormatLocale) -> String {
    if decimals == 0 {
        integer
    } else {
        format!("{integer}{}{}", locale.decimal_separator, "0".repeat(decimals))
    }
}

fn format_integer(
    negative: bool,
    magnitude: u128,
    spec: Option<NumberFormat>,
    locale: &FormatLocale,
) -> String {
    let body = match spec {
        Some(NumberFormat::Decimal(width)) => zero_pad(magnitude.to_string(), width),
        Some(NumberFormat::Hex { upper, digits }) => {
            let hex = if upper {
                format!("{magnitude:X}")
            } else {
                format!("{magnitude:x}")
            };
            zero_pad(hex, digits)
        }
        Some(NumberFormat::Grouped(decimals)) => with_decimals(
            group(&magnitude.to_string(), locale.group_separator),
            decimals.unwrap_or(2),
            locale,
        ),
        Some(NumberFormat::Fixed(decimals)) => {
            with_decimals(magnitude.to_string(), decimals.unwrap_or(2), locale)
        }
        Some(NumberFormat::Scientific { upper, digits }) => {
            scientific(magnitude as f64, upper, digits.unwrap_or(6), locale)
        }
        Some(NumberFormat::General) | None => magnitude.to_string(),
    };
    signed(negative && magnitude != 0, body, locale)
}

fn format_float(value: f64, spec: Option<NumberFormat>, locale: &FormatLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let negative = value < 0.0;
    if value.is_infinite() {
        return signed(negative, "Infinity".to_string(), locale);
    }
    let magnitude = value.abs();
    let body = match spec {
        Some(NumberFormat::Fixed(decimals)) => {
            localize(&format!("{:.*}", decimals.unwrap_or(2), magnitude), locale, false)
        }
        Some(NumberFormat::Grouped(decimals)) => {
            localize(&format!("{:.*}", decimals.unwrap_or(2), magnitude), locale, true)
        }
        Some(NumberFormat::Scientific { upper, digits }) => {
            scientific(magnitude, upper, digits.unwrap_or(6), locale)
        }
        // Integer-only specs do not apply to floats.
        Some(NumberFormat::Decimal(_) | NumberFormat::Hex { .. } | NumberFormat::General) | None => {
            localize(&magnitude.to_string(), locale, false)
        }
    };
    signed(negative, body, locale)
}

/// Swap in the locale separators for a plain `123.45` spelling.
fn localize(plain: &str, locale: &FormatLocale, grouped: bool) -> String {
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain, None),
    };
    let mut out = if grouped {
        group(integer, locale.group_separator)
    } else {
        integer.to_string()
    };
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// `d.dddE+ddd`: exponent carries a sign and at least three digits.
fn scientific(magnitude: f64, upper: bool, digits: usize, locale: &FormatLocale) -> String {
    let plain = format!("{magnitude:.digits$e}");
    let (mantissa, exponent) = plain.split_once('e').unwrap_or((plain.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{}{}{sign}{:03}",
        localize(mantissa, locale, false),
        if upper { 'E' } else { 'e' },
        exponent.unsigned_abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: impl Into<Value>, spec: &str) -> String {
        value.into().format(Some(spec), &FormatLocale::invariant())
    }

    #[test]
    fn test_default_spellings() {
        let locale = FormatLocale::invariant();
        assert_eq!(Value::None.format(None, &locale), "");
        assert_eq!(Value::from(true).format(None, &locale), "true");
        assert_eq!(Value::from('x').format(None, &locale), "x");
        assert_eq!(Value::from(-42).format(None, &locale), "-42");
        assert_eq!(Value::from(1.5).format(None, &locale), "1.5");
        assert_eq!(Value::from("abc").format(Some("D4"), &locale), "abc");
    }

    #[test]
    fn test_integer_specs() {
        assert_eq!(fmt(42, "D5"), "00042");
        assert_eq!(fmt(-42, "D5"), "-00042");
        assert_eq!(fmt(255u8, "X4"), "00FF");
        assert_eq!(fmt(255u8, "x"), "ff");
        assert_eq!(fmt(-255, "X"), "-FF");
        assert_eq!(fmt(1234567, "N0"), "1,234,567");
        assert_eq!(fmt(1234, "N"), "1,234.00");
        assert_eq!(fmt(7, "F1"), "7.0");
    }

    #[test]
    fn test_float_specs() {
        assert_eq!(fmt(1234.5, "F3"), "1234.500");
        assert_eq!(fmt(1234.5, "N2"), "1,234.50");
        assert_eq!(fmt(1234.56, "E2"), "1.23E+003");
        assert_eq!(fmt(0.00012, "e1"), "1.2e-004");
        assert_eq!(fmt(-0.5, "G"), "-0.5");
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(fmt(f64::NAN, "F2"), "NaN");
        assert_eq!(fmt(f64::INFINITY, "N2"), "Infinity");
        assert_eq!(fmt(f64::NEG_INFINITY, "F2"), "-Infinity");
    }

    #[test]
    fn test_unknown_spec_falls_back() {
        assert_eq!(fmt(42, "Q9"), "42");
        assert_eq!(fmt(42, "Dx"), "42");
        assert_eq!(fmt(42, ""), "42");
    }

    #[test]
    fn test_oversized_precision_falls_back() {
        assert_eq!(fmt(1, "D18446744073709551615"), "1");
        assert_eq!(fmt(1.5, "F1000"), "1.5");
        assert_eq!(fmt(1, "D99").len(), 99);
        assert_eq!(fmt(1, "D100"), "1");
    }

    #[test]
    fn test_locale_separators() {
        let locale = FormatLocale {
            decimal_separator: ',',
            group_separator: '.',
            negative_sign: "\u{2212}".to_string(),
        };
        assert_eq!(Value::from(-1234.5).format(Some("N1"), &locale), "\u{2212}1.234,5");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::None);
        assert_eq!(Value::from(Some(3u8)), Value::UInt(3));
    }

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn test_align() {
        assert_eq!(align("ab", Some(5)), "   ab");
        assert_eq!(align("ab", Some(-5)), "ab   ");
        assert_eq!(align("abcdef", Some(3)), "abcdef");
        assert_eq!(align("ab", None), "ab");
    }
}
