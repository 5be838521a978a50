use crate::{Value, encode::Encode, types::non_blank};

impl Encode for f32 {
    fn encode(self) -> Value {
        Value::Double(self.into())
    }
}

impl Encode for f64 {
    fn encode(self) -> Value {
        Value::Double(self)
    }
}

pub(crate) fn parse(value: &str) -> Option<f64> {
    non_blank(value)?.parse().ok()
}
