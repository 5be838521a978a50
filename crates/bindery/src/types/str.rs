use crate::{Value, encode::Encode, types::non_blank};

impl Encode for &str {
    fn encode(self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl Encode for String {
    fn encode(self) -> Value {
        Value::Text(self)
    }
}

/// Text is returned unchanged, except that blank input collapses to `""`.
pub(crate) fn parse(value: &str) -> String {
    parse_nullable(value).unwrap_or_default()
}

/// Nullable text: blank input is `None`, anything else is returned unchanged.
pub(crate) fn parse_nullable(value: &str) -> Option<String> {
    non_blank(value).map(|_| value.to_owned())
}
