use crate::{Value, encode::Encode, types::non_blank};

impl Encode for char {
    fn encode(self) -> Value {
        Value::Char(self)
    }
}

/// Parse text holding exactly one character.
pub(crate) fn parse(value: &str) -> Option<char> {
    non_blank(value)?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Split text into its characters. Blank text is an empty sequence.
pub(crate) fn parse_sequence(value: &str) -> Vec<char> {
    if non_blank(value).is_none() {
        return Vec::new();
    }
    value.chars().collect()
}
