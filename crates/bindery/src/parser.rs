//! The type parser registry.
//!
//! Every supported type has a pure function from text to a value of that type, resolved at
//! runtime by [`TypeId`]. Requesting a type that has no parser is an
//! [`Error::UnsupportedType`]; a value that fails to parse is not an error.
//!
//! ```
//! use bindery::parser;
//!
//! let id = parser::parse::<Option<i32>>("12")?;
//! assert_eq!(id, Some(12));
//! assert_eq!(parser::parse::<i32>("  ")?, 0);
//! # Ok::<(), bindery::Error>(())
//! ```
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
};

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::{
    Error, Result,
    types::{self, time::DATETIME_ZERO},
};

static TEXT: Lazy<ParserTable> = Lazy::new(ParserTable::text);
static COLUMN: Lazy<ParserTable> = Lazy::new(ParserTable::column);

/// A resolved parser for `T`.
pub struct Parser<T> {
    parse: fn(&str) -> T,
}

impl<T> Parser<T> {
    /// Parse `value`. Never fails: unparseable text yields `None` or the zero value of `T`.
    pub fn parse(&self, value: &str) -> T {
        (self.parse)(value)
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Parser<T> {}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// A table of parsers keyed by target type.
pub struct ParserTable {
    parsers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

// Registers `Option<$ty>` with `$parse` and `$ty` with `$parse` falling back to `$zero`.
macro_rules! nullable {
    ($table:ident, $ty:ty, $parse:path, $zero:expr) => {
        $table.insert::<Option<$ty>>(|v| $parse(v));
        $table.insert::<$ty>(|v| $parse(v).unwrap_or($zero));
    };
}

impl ParserTable {
    fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Build the table used for plain text.
    pub fn text() -> Self {
        let mut table = Self::empty();
        nullable!(table, Uuid, types::uuid::parse, Uuid::nil());
        nullable!(table, i32, types::int::parse_i32, 0);
        nullable!(table, i64, types::int::parse_i64, 0);
        nullable!(table, Decimal, types::decimal::parse, Decimal::ZERO);
        nullable!(table, f64, types::float::parse, 0.0);
        nullable!(table, bool, types::bool::parse, false);
        nullable!(table, PrimitiveDateTime, types::time::parse, DATETIME_ZERO);
        nullable!(table, char, types::char::parse, '\0');
        table.insert::<String>(types::str::parse);
        table.insert::<Option<String>>(types::str::parse_nullable);
        table.insert::<Vec<char>>(types::char::parse_sequence);
        table
    }

    /// Build the table used for column values. Identical to [`ParserTable::text`] except that
    /// booleans accept integer-backed columns.
    pub fn column() -> Self {
        let mut table = Self::text();
        nullable!(table, bool, types::bool::parse_column, false);
        table
    }

    fn insert<T: 'static>(&mut self, parse: fn(&str) -> T) {
        self.parsers.insert(TypeId::of::<T>(), Box::new(parse));
    }

    /// Resolve the parser for `T`.
    pub fn get<T: 'static>(&self) -> Result<Parser<T>> {
        self.parsers
            .get(&TypeId::of::<T>())
            .and_then(|p| p.downcast_ref::<fn(&str) -> T>())
            .map(|parse| Parser { parse: *parse })
            .ok_or(Error::UnsupportedType {
                type_name: type_name::<T>(),
            })
    }

    /// Returns `true` if a parser is registered for `T`.
    pub fn supports<T: 'static>(&self) -> bool {
        self.parsers.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types, counting `T` and `Option<T>` separately.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Returns `true` if no parser is registered.
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserTable")
            .field("len", &self.parsers.len())
            .finish()
    }
}

/// Resolve the text parser for `T`.
pub fn parser<T: 'static>() -> Result<Parser<T>> {
    TEXT.get()
}

/// Parse `value` as `T` in one step.
pub fn parse<T: 'static>(value: &str) -> Result<T> {
    Ok(parser::<T>()?.parse(value))
}

/// Returns `true` if `T` can be parsed from text.
pub fn supports<T: 'static>() -> bool {
    TEXT.supports::<T>()
}

/// Resolve the column parser for `T`.
pub(crate) fn column_parser<T: 'static>() -> Result<Parser<T>> {
    COLUMN.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_types_fail_at_resolution() {
        let err = parser::<u128>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { type_name } if type_name == "u128"));
        assert!(!supports::<Option<u8>>());
        assert!(supports::<Option<Uuid>>());
    }

    #[test]
    fn blank_text_is_zero_or_none() {
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(parse::<Uuid>(blank).unwrap(), Uuid::nil());
            assert_eq!(parse::<Option<Uuid>>(blank).unwrap(), None);
            assert_eq!(parse::<i32>(blank).unwrap(), 0);
            assert_eq!(parse::<Option<i32>>(blank).unwrap(), None);
            assert_eq!(parse::<i64>(blank).unwrap(), 0);
            assert_eq!(parse::<Option<i64>>(blank).unwrap(), None);
            assert_eq!(parse::<Decimal>(blank).unwrap(), Decimal::ZERO);
            assert_eq!(parse::<Option<Decimal>>(blank).unwrap(), None);
            assert_eq!(parse::<f64>(blank).unwrap(), 0.0);
            assert_eq!(parse::<Option<f64>>(blank).unwrap(), None);
            assert!(!parse::<bool>(blank).unwrap());
            assert_eq!(parse::<Option<bool>>(blank).unwrap(), None);
            assert_eq!(parse::<PrimitiveDateTime>(blank).unwrap(), DATETIME_ZERO);
            assert_eq!(parse::<Option<PrimitiveDateTime>>(blank).unwrap(), None);
            assert_eq!(parse::<char>(blank).unwrap(), '\0');
            assert_eq!(parse::<Option<char>>(blank).unwrap(), None);
            assert_eq!(parse::<String>(blank).unwrap(), "");
            assert_eq!(parse::<Option<String>>(blank).unwrap(), None);
            assert!(parse::<Vec<char>>(blank).unwrap().is_empty());
        }
    }

    #[test]
    fn failures_fall_back_silently() {
        assert_eq!(parse::<i32>("abc").unwrap(), 0);
        assert_eq!(parse::<Option<Uuid>>("{nope}").unwrap(), None);
        assert!(!parse::<bool>("1").unwrap());
    }

    #[test]
    fn column_table_differs_only_for_booleans() {
        let text = ParserTable::text();
        let column = ParserTable::column();
        assert_eq!(text.len(), column.len());
        assert!(!text.get::<bool>().unwrap().parse("1"));
        assert!(column.get::<bool>().unwrap().parse("1"));
        assert_eq!(column.get::<Option<bool>>().unwrap().parse("0"), Some(false));
        assert_eq!(column.get::<i32>().unwrap().parse("7"), 7);
    }

    #[test]
    fn parsers_are_copy() {
        let p = parser::<Option<i64>>().unwrap();
        let q = p;
        assert_eq!(p.parse("5"), q.parse("5"));
        assert!(format!("{p:?}").contains("i64"));
    }
}
