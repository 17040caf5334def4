// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Width-independent numeric canonicalization.
//!
//! Every number is reduced to its minimal plain decimal text before hashing:
//! no exponent, no leading zeros in the integer part, no trailing zeros in the
//! fraction, no trailing `.0`. Numerically equal values of different widths
//! therefore produce the same text (`17u8`, `17i64`, `17.0f32`,
//! `Decimal("17.000")` all become `"17"`). Integral floats use their exact
//! digits at any magnitude, so `2^64` is the same number as an `f64` or a
//! `u128`.
//!
//! Non-finite floats map to fixed sentinels ([`POS_INF`], [`NEG_INF`],
//! [`NAN`]) instead of any platform rendering. `-0.0` canonicalizes to `"0"`.

use std::fmt;
use std::num::FpCategory;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Canonical text of `+∞`.
pub const POS_INF: &str = "+Inf";
/// Canonical text of `-∞`.
pub const NEG_INF: &str = "-Inf";
/// Canonical text of every NaN payload.
pub const NAN: &str = "NaN";

/// Largest decimal exponent magnitude [`Decimal`] accepts.
///
/// Canonical text is plain (no exponent), so the exponent bounds the length
/// of the rendered string.
pub const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// A numeric value of any supported width.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Any signed integer up to 128 bits.
    Int(i128),
    /// Any unsigned integer up to 128 bits.
    UInt(u128),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
}

impl Number {
    /// Minimal plain decimal text (or a non-finite sentinel).
    ///
    /// Integral floats render with their exact digits (`{:.0}`); other finite
    /// floats use `Display`, the shortest round-trip text in plain notation.
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::F32(v) => float_text(v.classify(), v.is_sign_negative(), || {
                if v.fract() == 0.0 {
                    format!("{v:.0}")
                } else {
                    v.to_string()
                }
            }),
            Self::F64(v) => float_text(v.classify(), v.is_sign_negative(), || {
                if v.fract() == 0.0 {
                    format!("{v:.0}")
                } else {
                    v.to_string()
                }
            }),
            Self::Decimal(d) => d.as_str().to_owned(),
        }
    }
}

fn float_text(category: FpCategory, negative: bool, finite: impl FnOnce() -> String) -> String {
    match category {
        FpCategory::Nan => NAN.to_owned(),
        FpCategory::Infinite if negative => NEG_INF.to_owned(),
        FpCategory::Infinite => POS_INF.to_owned(),
        FpCategory::Zero => "0".to_owned(),
        FpCategory::Subnormal | FpCategory::Normal => finite(),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

number_from!(Int as i128: i8, i16, i32, i64, i128);
number_from!(UInt as u128: u8, u16, u32, u64, u128);

impl From<isize> for Number {
    fn from(v: isize) -> Self {
        // isize is at most 64 bits on every supported target.
        Self::Int(v as i128)
    }
}

impl From<usize> for Number {
    fn from(v: usize) -> Self {
        Self::UInt(v as u128)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<char> for Number {
    /// A character canonicalizes as its Unicode code point.
    fn from(c: char) -> Self {
        Self::UInt(u128::from(u32::from(c)))
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

/// Arbitrary-precision decimal held in canonical form.
///
/// Parsed from literals such as `"17"`, `"-017.500"`, `"1.5e3"` or `".25"`.
/// Equality is equality of the canonical text, which is numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decimal {
    canonical: String,
}

impl Decimal {
    /// Parse a decimal literal: optional sign, digits with an optional `.`,
    /// optional exponent `e[+-]digits`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDecimal`] when the literal is malformed or its
    /// exponent exceeds [`MAX_DECIMAL_EXPONENT`].
    pub fn parse(literal: &str) -> Result<Self> {
        let invalid = || Error::InvalidDecimal(literal.to_owned());
        let s = literal.trim();
        let (negative, s) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(at) => {
                let exp: i64 = s[at + 1..].parse().map_err(|_| invalid())?;
                (&s[..at], exp)
            }
            None => (s, 0),
        };
        if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT.unsigned_abs() {
            return Err(invalid());
        }
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let offset = |n: usize| i64::try_from(n).map_err(|_| invalid());
        let count = |n: i64| usize::try_from(n).map_err(|_| invalid());
        let leading = digits.len() - digits.trim_start_matches('0').len();
        // Position of the decimal point, counted from the left of `significant`.
        let point = offset(int_part.len())? + exponent - offset(leading)?;
        let significant = digits[leading..].trim_end_matches('0');

        if significant.is_empty() {
            return Ok(Self {
                canonical: "0".to_owned(),
            });
        }

        let len = offset(significant.len())?;
        let mut canonical = String::with_capacity(significant.len() + 4);
        if negative {
            canonical.push('-');
        }
        if point <= 0 {
            canonical.push_str("0.");
            canonical.extend(std::iter::repeat_n('0', count(-point)?));
            canonical.push_str(significant);
        } else if point >= len {
            canonical.push_str(significant);
            canonical.extend(std::iter::repeat_n('0', count(point - len)?));
        } else {
            let (whole, frac) = significant.split_at(count(point)?);
            canonical.push_str(whole);
            canonical.push('.');
            canonical.push_str(frac);
        }
        Ok(Self { canonical })
    }

    /// Canonical text.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl From<i128> for Decimal {
    fn from(v: i128) -> Self {
        Self {
            canonical: v.to_string(),
        }
    }
}

impl From<u128> for Decimal {
    fn from(v: u128) -> Self {
        Self {
            canonical: v.to_string(),
        }
    }
}
