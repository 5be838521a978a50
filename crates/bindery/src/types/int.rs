use crate::{Value, encode::Encode, types::non_blank};

impl Encode for i8 {
    fn encode(self) -> Value {
        Value::Int(self.into())
    }
}

impl Encode for i16 {
    fn encode(self) -> Value {
        Value::Int(self.into())
    }
}

impl Encode for i32 {
    fn encode(self) -> Value {
        Value::Int(self)
    }
}

impl Encode for i64 {
    fn encode(self) -> Value {
        Value::Int64(self)
    }
}

impl Encode for u8 {
    fn encode(self) -> Value {
        Value::Int(self.into())
    }
}

impl Encode for u16 {
    fn encode(self) -> Value {
        Value::Int(self.into())
    }
}

impl Encode for u32 {
    fn encode(self) -> Value {
        Value::Int64(self.into())
    }
}

/// Parse a 32-bit integer. Text that is not an integer but is a finite number within range is
/// truncated toward zero, so `"1234.56"` parses as `1234`.
pub(crate) fn parse_i32(value: &str) -> Option<i32> {
    let value = non_blank(value)?;
    if let Ok(v) = value.parse() {
        return Some(v);
    }
    truncate(value, i32::MIN.into(), -f64::from(i32::MIN)).map(|v| v as i32)
}

/// Parse a 64-bit integer with the same truncation rule as [`parse_i32`].
pub(crate) fn parse_i64(value: &str) -> Option<i64> {
    let value = non_blank(value)?;
    if let Ok(v) = value.parse() {
        return Some(v);
    }
    truncate(value, i64::MIN as f64, -(i64::MIN as f64)).map(|v| v as i64)
}

// `end` is exclusive: `i64::MAX as f64` rounds up to 2^63.
fn truncate(value: &str, min: f64, end: f64) -> Option<f64> {
    let v = value.parse::<f64>().ok()?.trunc();
    (v.is_finite() && v >= min && v < end).then_some(v)
}
