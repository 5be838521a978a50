use std::fmt;

use rust_decimal::Decimal;
use time::{PrimitiveDateTime, macros::format_description as fd};
use uuid::Uuid;

/// A dynamically typed parameter or column value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Uuid(Uuid),
    Int(i32),
    Int64(i64),
    Decimal(Decimal),
    Double(f64),
    Bool(bool),
    DateTime(PrimitiveDateTime),
    Char(char),
    Text(String),
    /// A sequence of values. Bound to a command by expanding it into one parameter per element.
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` when the rendered value is empty or only whitespace. Covers `Null`, blank
    /// text, a whitespace `Char` and an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(v) => v.trim().is_empty(),
            Value::Char(c) => c.is_whitespace(),
            Value::List(_) => self.to_string().trim().is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Uuid(_) => "uuid",
            Value::Int(_) => "int",
            Value::Int64(_) => "int64",
            Value::Decimal(_) => "decimal",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::DateTime(_) => "datetime",
            Value::Char(_) => "char",
            Value::Text(_) => "text",
            Value::List(_) => "list",
        }
    }
}

/// The string form of a value, as seen by the parsers. `Null` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Uuid(v) => write!(f, "{}", v.hyphenated()),
            Value::Int(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::DateTime(v) => {
                let format = fd!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:7]");
                let formatted = v.format(&format).map_err(|_| fmt::Error)?;
                f.write_str(&formatted)
            }
            Value::Char(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::List(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn null_renders_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert!(Value::Null.is_blank());
        assert!(Value::Text("  ".into()).is_blank());
        assert!(!Value::Int(0).is_blank());
        assert!(Value::Char(' ').is_blank());
        assert!(!Value::Char('x').is_blank());
        assert!(Value::List(Vec::new()).is_blank());
        assert!(!Value::List(vec![Value::Int(1)]).is_blank());
    }

    #[test]
    fn datetime_renders_round_trip_form() {
        let v = Value::DateTime(datetime!(2023-12-25 15:30:45.1234567));
        assert_eq!(v.to_string(), "2023-12-25T15:30:45.1234567");
    }

    #[test]
    fn list_renders_comma_joined() {
        let v = Value::List(vec![Value::Int(1), Value::Text("b".into()), Value::Null]);
        assert_eq!(v.to_string(), "1,b,");
    }
}
