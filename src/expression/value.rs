//! Arbitrary precision integers with an `i64` fast path
//!
//! Literals compound through repeated multiplication, so values may leave the
//! 64-bit range. Results are computed on `i64` while they fit and promoted to
//! `BigInt` on overflow. Values are kept normalized: a `BigInt` is only stored
//! when the value does not fit in an `i64`, which keeps equality and hashing
//! consistent between the two representations.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Sub};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Small(i64),
    Big(BigInt),
}

/// Exact signed integer used for every cell and literal
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Value(Repr);

impl Value {
    /// Create a value from a machine integer
    pub const fn new(value: i64) -> Self {
        Self(Repr::Small(value))
    }

    /// Returns the value as an `i64` when it fits
    pub const fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::Small(value) => Some(value),
            Repr::Big(_) => None,
        }
    }

    /// Widen to an arbitrary precision integer
    pub fn to_bigint(&self) -> BigInt {
        match &self.0 {
            Repr::Small(value) => BigInt::from(*value),
            Repr::Big(value) => value.clone(),
        }
    }

    /// Check for zero
    pub fn is_zero(&self) -> bool {
        match &self.0 {
            Repr::Small(value) => *value == 0,
            Repr::Big(value) => value.is_zero(),
        }
    }

    /// Check for a strictly negative value
    pub fn is_negative(&self) -> bool {
        match &self.0 {
            Repr::Small(value) => *value < 0,
            Repr::Big(value) => value.is_negative(),
        }
    }

    /// Lossy conversion used for ratios and color mapping
    ///
    /// Magnitudes beyond `f64` range saturate to infinity.
    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            Repr::Small(value) => *value as f64,
            Repr::Big(value) => value.to_f64().unwrap_or(if value.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
        }
    }

    /// Floor division, rounding toward negative infinity
    ///
    /// Returns `None` for a zero divisor.
    pub fn div_floor(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        // checked_div only fails for i64::MIN / -1, which the BigInt path handles
        Some(combine(
            self,
            divisor,
            |a, b| a.checked_div(b).map(|_| Integer::div_floor(&a, &b)),
            |a, b| Integer::div_floor(&a, &b),
        ))
    }

    /// Floor remainder, taking the sign of the divisor
    ///
    /// Returns `None` for a zero divisor.
    pub fn mod_floor(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        Some(combine(
            self,
            divisor,
            |a, b| a.checked_rem(b).map(|_| Integer::mod_floor(&a, &b)),
            |a, b| Integer::mod_floor(&a, &b),
        ))
    }
}

// Small fast path with a BigInt fallback when the small operation overflows
fn combine(
    lhs: &Value,
    rhs: &Value,
    small: impl FnOnce(i64, i64) -> Option<i64>,
    big: impl FnOnce(BigInt, BigInt) -> BigInt,
) -> Value {
    if let (Repr::Small(a), Repr::Small(b)) = (&lhs.0, &rhs.0) {
        if let Some(result) = small(*a, *b) {
            return Value::new(result);
        }
    }
    Value::from(big(lhs.to_bigint(), rhs.to_bigint()))
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        match value.to_i64() {
            Some(small) => Self::new(small),
            None => Self(Repr::Big(value)),
        }
    }
}

impl FromStr for Value {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(small) => Ok(Self::new(small)),
            Err(_) => s.parse::<BigInt>().map(Self::from),
        }
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: Self) -> Value {
        combine(self, rhs, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: Self) -> Value {
        combine(self, rhs, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: Self) -> Value {
        combine(self, rhs, i64::checked_mul, |a, b| a * b)
    }
}

// Bitwise operators follow two's complement semantics on both paths
impl BitAnd for &Value {
    type Output = Value;

    fn bitand(self, rhs: Self) -> Value {
        combine(self, rhs, |a, b| Some(a & b), |a, b| a & b)
    }
}

impl BitOr for &Value {
    type Output = Value;

    fn bitor(self, rhs: Self) -> Value {
        combine(self, rhs, |a, b| Some(a | b), |a, b| a | b)
    }
}

impl BitXor for &Value {
    type Output = Value;

    fn bitxor(self, rhs: Self) -> Value {
        combine(self, rhs, |a, b| Some(a ^ b), |a, b| a ^ b)
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        match &self.0 {
            Repr::Small(value) => value
                .checked_neg()
                .map_or_else(|| Value::from(-BigInt::from(*value)), Value::new),
            Repr::Big(value) => Value::from(-value.clone()),
        }
    }
}

impl Not for &Value {
    type Output = Value;

    fn not(self) -> Value {
        match &self.0 {
            Repr::Small(value) => Value::new(!*value),
            Repr::Big(value) => Value::from(!value.clone()),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            (Repr::Big(a), Repr::Big(b)) => a.cmp(b),
            // A normalized big value always lies outside the i64 range
            (Repr::Small(_), Repr::Big(b)) => {
                if b.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Repr::Big(a), Repr::Small(_)) => {
                if a.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Small(value) => write!(f, "{value}"),
            Repr::Big(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Repr::Small(value) => serializer.serialize_i64(*value),
            Repr::Big(value) => match value.to_i128() {
                Some(wide) => serializer.serialize_i128(wide),
                None => serializer.serialize_str(&value.to_string()),
            },
        }
    }
}
