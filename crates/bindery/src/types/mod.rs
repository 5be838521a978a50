//! Conversions between Rust values and bindery [`Value`](crate::Value)s, and the text parsers
//! behind the [parser registry](crate::parser).
//!
//! # Types
//!
//! | Rust type                             | Value variant   | Parsed from text |
//! |---------------------------------------|-----------------|------------------|
//! | `uuid::Uuid`                          | `Uuid`          | yes              |
//! | `i8`, `i16`, `i32`, `u8`, `u16`       | `Int`           | `i32` only       |
//! | `i64`, `u32`                          | `Int64`         | `i64` only       |
//! | `rust_decimal::Decimal`               | `Decimal`       | yes              |
//! | `f32`, `f64`                          | `Double`        | `f64` only       |
//! | `bool`                                | `Bool`          | yes              |
//! | `time::PrimitiveDateTime`             | `DateTime`      | yes              |
//! | `time::OffsetDateTime`                | `DateTime`      | no               |
//! | `time::Date`                          | `DateTime`      | no               |
//! | `char`                                | `Char`          | yes              |
//! | `&str`, [`String`]                    | `Text`          | yes              |
//!
//! Character sequences parse into `Vec<char>`, but like any `Vec` they encode as a `List`; bind
//! a `String` to send them as text.
//!
//! `OffsetDateTime` values are normalised to UTC before the offset is dropped. A `Date` binds as
//! midnight of that day.
//!
//! # Nullable
//!
//! `Option<T>` is supported wherever `T` is. `None` encodes as [`Value::Null`](crate::Value::Null),
//! and the nullable parser for `T` is registered under `Option<T>`.
//!
//! # Parse failures
//!
//! Text that cannot be parsed is never an error. The nullable parser yields `None` and the
//! non-nullable parser yields the zero value of the type: `Uuid::nil()`, `0`, `false`,
//! `0001-01-01T00:00:00`, or `'\0'`.

pub(crate) mod bool;
pub(crate) mod char;
pub(crate) mod decimal;
pub(crate) mod float;
pub(crate) mod int;
pub(crate) mod str;
pub mod time;
pub(crate) mod uuid;

/// Trim `value` and return it, or `None` if nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
