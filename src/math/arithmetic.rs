//! Total integer division and remainder
//!
//! Expression evaluation must never fail, so the zero-divisor cases resolve
//! to fixed values instead of raising.

use crate::expression::Value;

/// Floor division that is defined for a zero divisor
///
/// `0 / 0` is `1`, any other `a / 0` is `-1`.
pub fn safe_div(dividend: &Value, divisor: &Value) -> Value {
    dividend.div_floor(divisor).unwrap_or_else(|| {
        if dividend.is_zero() {
            Value::new(1)
        } else {
            Value::new(-1)
        }
    })
}

/// Floor remainder (sign follows the divisor) that is `0` for a zero divisor
pub fn safe_mod(dividend: &Value, divisor: &Value) -> Value {
    dividend
        .mod_floor(divisor)
        .unwrap_or_else(|| Value::new(0))
}
