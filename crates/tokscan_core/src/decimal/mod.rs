//! Arbitrary-precision decimal numbers.
//!
//! [`Decimal`] keeps the exact digits of a decimal token, however many
//! there are, together with the number of digits written after the point.
//! It is the target type for [`Scanner::read_decimal`](crate::Scanner::read_decimal)
//! when neither `f32` nor `f64` can represent a value exactly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

use crate::{FromToken, TokenShape};

/// Exact decimal value: `(-1)^negative * coefficient * 10^-scale`.
///
/// Equality, ordering and hashing are by numeric value, so `1.50 == 1.5`
/// and `-0 == 0`. [`scale`](Self::scale) and `Display` keep the number of
/// fraction digits as written.
#[derive(Clone, Debug)]
pub struct Decimal {
    negative: bool,
    /// Coefficient digits without leading zeros; empty for zero.
    coefficient: String,
    /// Digits after the decimal point.
    scale: u32,
}

/// Failure to parse a [`Decimal`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecimalParseError {
    #[error("empty decimal literal")]
    Empty,
    #[error("decimal literal has no digits")]
    NoDigits,
    #[error("invalid character {ch:?} at position {position} in decimal literal")]
    InvalidChar { ch: char, position: usize },
    #[error("decimal literal has too many fraction digits")]
    ScaleTooLarge,
}

impl Decimal {
    /// Zero with scale 0.
    pub fn zero() -> Self {
        Self {
            negative: false,
            coefficient: String::new(),
            scale: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_empty()
    }

    /// `true` for values below zero. Negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Number of fraction digits as written (`"1.50"` has scale 2).
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Same value with trailing fraction zeros removed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut coefficient = self.coefficient.clone();
        let mut scale = self.scale;
        while scale > 0 && coefficient.ends_with('0') {
            coefficient.pop();
            scale -= 1;
        }
        if coefficient.is_empty() {
            return Self::zero();
        }
        Self {
            negative: self.negative,
            coefficient,
            scale,
        }
    }

    /// Nearest `f64`. Lossy for long coefficients.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Compare magnitudes of two normalized, non-zero values.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "coefficient length is bounded by input size, far below i64::MAX"
    )]
    fn cmp_magnitude(a: &Self, b: &Self) -> Ordering {
        let int_len = |d: &Self| d.coefficient.len() as i64 - i64::from(d.scale);
        int_len(a).cmp(&int_len(b)).then_with(|| {
            // Same number of integer digits and no leading zeros: compare
            // digit by digit, padding the shorter fraction with zeros.
            let width = a.coefficient.len().max(b.coefficient.len());
            let pad = |d: &Self| format!("{:0<width$}", d.coefficient);
            pad(a).cmp(&pad(b))
        })
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    /// Parse `-?digits?(.digits?)?` with at least one digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecimalParseError::Empty);
        }
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let offset = s.len() - body.len();

        let mut digits = String::with_capacity(body.len());
        let mut fraction_len = None;
        for (i, ch) in body.char_indices() {
            match ch {
                '0'..='9' => {
                    digits.push(ch);
                    if let Some(len) = fraction_len.as_mut() {
                        *len += 1;
                    }
                }
                '.' if fraction_len.is_none() => fraction_len = Some(0usize),
                _ => {
                    return Err(DecimalParseError::InvalidChar {
                        ch,
                        position: offset + i,
                    })
                }
            }
        }
        if digits.is_empty() {
            return Err(DecimalParseError::NoDigits);
        }

        let scale = u32::try_from(fraction_len.unwrap_or(0))
            .map_err(|_| DecimalParseError::ScaleTooLarge)?;
        let coefficient = digits.trim_start_matches('0').to_string();
        Ok(Self {
            negative,
            coefficient,
            scale,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            let digits = if self.is_zero() { "0" } else { &self.coefficient };
            return f.write_str(digits);
        }
        let padded = format!("{:0>width$}", self.coefficient, width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{whole}.{fraction}")
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.normalized(), other.normalized());
        match (a.is_zero(), b.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if b.negative {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                return if a.negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {}
        }
        match (a.negative, b.negative) {
            (false, false) => Self::cmp_magnitude(&a, &b),
            (true, true) => Self::cmp_magnitude(&b, &a),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        n.negative.hash(state);
        n.coefficient.hash(state);
        n.scale.hash(state);
    }
}

impl FromToken for Decimal {
    const SHAPE: TokenShape = TokenShape::Decimal;
    const NAME: &'static str = "decimal";

    fn from_token(token: &str) -> Result<Self, String> {
        token.parse().map_err(|e: DecimalParseError| e.to_string())
    }
}
