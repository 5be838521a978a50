use uuid::{Uuid, fmt::Hyphenated};

use crate::{Value, encode::Encode, types::non_blank};

impl Encode for Uuid {
    fn encode(self) -> Value {
        Value::Uuid(self)
    }
}

/// Parse the dashed form `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, optionally wrapped in braces.
pub(crate) fn parse(value: &str) -> Option<Uuid> {
    let value = non_blank(value)?;
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .unwrap_or(value);
    if inner.len() != Hyphenated::LENGTH {
        return None;
    }
    Uuid::try_parse(inner).ok()
}
