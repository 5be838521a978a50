use crate::{Value, encode::Encode, types::{int, non_blank}};

impl Encode for bool {
    fn encode(self) -> Value {
        Value::Bool(self)
    }
}

/// Parse `true` or `false`, ignoring case and surrounding whitespace.
pub(crate) fn parse(value: &str) -> Option<bool> {
    let value = non_blank(value)?;
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a boolean column. Integer-backed columns are tried first, where only `1` is `true`;
/// anything else falls back to [`parse`].
pub(crate) fn parse_column(value: &str) -> Option<bool> {
    int::parse_i32(value).map(|v| v == 1).or_else(|| parse(value))
}
