//! Typed parameter binding and value parsing for SQL commands and stored procedures.
//!
//! - [`parser`] turns text into any of a fixed set of types, with `None` or a zero value on
//!   failure rather than an error.
//! - [`binding`] resolves the stored procedure parameters a configuration type declares.
//! - [`Command`] binds parameters, expanding lists into one parameter per element.
//! - [`Row`] parses columns through the same parsers.
//! - [`DatabaseFacade`] runs commands against a [`Database`] and logs each execution.
extern crate self as bindery;

pub use bindery_macros::*;

pub mod binding;
pub mod command;
mod database;
mod encode;
mod error;
mod facade;
mod logger;
pub mod parser;
mod row;
pub mod types;
mod value;
mod values;

pub use crate::{
    binding::{
        BindingTable, DefaultParameterValue, MemberBinding, MemberKind, ParameterBinding,
        ProcedureParameters,
    },
    command::{Command, CommandKind, ParameterMap, Parameters, command, procedure},
    database::{ConnectionStrings, Database},
    encode::Encode,
    error::{Error, Result},
    facade::{DatabaseFacade, FacadeOptions, no_parameters},
    logger::{CommandLogger, LogSettings},
    row::{Column, FromRow, Row, RowSet},
    value::Value,
    values::{ToValues, Values},
};
