use rust_decimal::Decimal;

use crate::{Value, encode::Encode, types::non_blank};

impl Encode for Decimal {
    fn encode(self) -> Value {
        Value::Decimal(self)
    }
}

pub(crate) fn parse(value: &str) -> Option<Decimal> {
    let value = non_blank(value)?;
    value
        .parse()
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
