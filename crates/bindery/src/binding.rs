//! Declarative parameter binding for stored procedures.
//!
//! A configuration type describes, once, which of its members become procedure parameters and
//! under which names. The description is a [`BindingTable`], normally generated by
//! `#[derive(ProcedureParameters)]`:
//!
//! ```
//! use bindery::{ProcedureParameters, binding};
//!
//! #[derive(ProcedureParameters)]
//! #[bindery(procedure = "dbo.SaveUser")]
//! struct SaveUser {
//!     #[bindery(param(alias = "x"))]
//!     name: String,
//!     #[bindery(param(alias = "y", default = 42))]
//!     age: Option<i32>,
//! }
//!
//! let map = binding::resolve("dbo.SaveUser", &SaveUser { name: "ann".into(), age: None })?;
//! assert_eq!(map.get("@y"), Some(&bindery::Value::Int(42)));
//! # Ok::<(), bindery::Error>(())
//! ```
//!
//! Only the single procedure named by the table is supported. Resolving against any other
//! procedure name binds nothing.
use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use once_cell::sync::Lazy;

use crate::{Error, Result, Value, command::ParameterMap, encode::Encode};

/// How one member is bound to one parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBinding {
    alias: Option<String>,
    ignore_if_null: bool,
    default_if_null: Option<Value>,
}

impl ParameterBinding {
    /// Bind under the member's own name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind under `alias` instead of the member's name.
    pub fn aliased(alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::default()
        }
    }

    /// Leave the parameter out entirely when the member is null.
    pub fn ignore_if_null(mut self) -> Self {
        self.ignore_if_null = true;
        self
    }

    /// Bind `value` when the member is null.
    pub fn default_if_null(mut self, value: impl Encode) -> Self {
        self.default_if_null = Some(value.encode());
        self
    }

    /// The parameter name override. A blank alias counts as no alias.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|a| !a.trim().is_empty())
    }

    pub fn is_ignore_if_null(&self) -> bool {
        self.ignore_if_null
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_if_null.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A field read in place.
    Field,
    /// A zero-argument accessor method.
    Method,
}

/// A member together with every parameter it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBinding {
    name: String,
    kind: MemberKind,
    parameters: Vec<ParameterBinding>,
}

impl MemberBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn parameters(&self) -> &[ParameterBinding] {
        &self.parameters
    }
}

/// The binding metadata of a configuration type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    procedure: Option<String>,
    members: Vec<MemberBinding>,
}

impl BindingTable {
    pub fn builder() -> BindingTableBuilder {
        BindingTableBuilder::default()
    }

    /// The procedure these bindings apply to.
    pub fn procedure(&self) -> Option<&str> {
        self.procedure.as_deref()
    }

    /// Bound members, fields first in declaration order, then methods.
    pub fn members(&self) -> &[MemberBinding] {
        &self.members
    }
}

#[derive(Debug, Default)]
pub struct BindingTableBuilder {
    table: BindingTable,
}

impl BindingTableBuilder {
    pub fn procedure(mut self, name: impl Into<String>) -> Self {
        self.table.procedure = Some(name.into());
        self
    }

    pub fn field<I>(self, name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterBinding>,
    {
        self.member(name.into(), MemberKind::Field, parameters)
    }

    pub fn method<I>(self, name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterBinding>,
    {
        self.member(name.into(), MemberKind::Method, parameters)
    }

    fn member<I>(mut self, name: String, kind: MemberKind, parameters: I) -> Self
    where
        I: IntoIterator<Item = ParameterBinding>,
    {
        self.table.members.push(MemberBinding {
            name,
            kind,
            parameters: parameters.into_iter().collect(),
        });
        self
    }

    pub fn build(self) -> BindingTable {
        self.table
    }
}

/// A fallback for a null member that cannot be written as a constant, keyed by procedure and
/// member name.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultParameterValue {
    pub procedure: String,
    pub member: String,
    pub value: Value,
}

impl DefaultParameterValue {
    pub fn new(procedure: impl Into<String>, member: impl Into<String>, value: impl Encode) -> Self {
        Self {
            procedure: procedure.into(),
            member: member.into(),
            value: value.encode(),
        }
    }
}

/// A configuration type whose members bind to stored procedure parameters.
pub trait ProcedureParameters {
    /// The binding table for this type. Built once and shared by every call.
    fn bindings() -> &'static BindingTable;

    /// Read the current value of the member called `member`.
    fn member_value(&self, member: &str) -> Result<Value>;

    /// Defaults for null members that have no inline default.
    fn defaults(&self) -> Vec<DefaultParameterValue> {
        Vec::new()
    }
}

static TABLES: Lazy<RwLock<HashMap<TypeId, &'static BindingTable>>> = Lazy::new(Default::default);

/// Return the binding table registered for `T`, building and registering it with `build` on
/// first use.
pub fn memoize<T: 'static>(build: impl FnOnce() -> BindingTable) -> &'static BindingTable {
    let id = TypeId::of::<T>();
    if let Some(table) = TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return *table;
    }
    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    *tables
        .entry(id)
        .or_insert_with(|| &*Box::leak(Box::new(build())))
}

/// Resolve the parameters `source` binds for `procedure`.
///
/// Member values are read only when `procedure` is the one declared by the binding table. A
/// null member is skipped if its binding says so, and otherwise takes the first of the
/// binding's inline default, the matching entry of [`ProcedureParameters::defaults`], or
/// `NULL`.
pub fn resolve<P>(procedure: &str, source: &P) -> Result<ParameterMap>
where
    P: ProcedureParameters,
{
    let table = P::bindings();
    let declared = table.procedure().ok_or_else(|| {
        Error::Configuration(format!(
            "{} does not declare a stored procedure",
            type_name::<P>()
        ))
    })?;

    let mut map = ParameterMap::new();
    if procedure != declared {
        tracing::trace!(
            target: "bindery::binding",
            procedure,
            declared,
            "procedure does not match declared procedure, nothing bound"
        );
        return Ok(map);
    }

    let mut defaults = None;
    for member in table.members() {
        if member.parameters().is_empty() {
            continue;
        }
        let value = source.member_value(member.name())?;
        for binding in member.parameters() {
            let name = binding.alias().unwrap_or(member.name());
            if !value.is_null() {
                map.insert(name, value.clone())?;
                continue;
            }
            if binding.is_ignore_if_null() {
                tracing::trace!(
                    target: "bindery::binding",
                    member = member.name(),
                    parameter = name,
                    "null member skipped"
                );
                continue;
            }
            let effective = match binding.default_value() {
                Some(v) => v.clone(),
                None => defaults
                    .get_or_insert_with(|| source.defaults())
                    .iter()
                    .find(|d| d.procedure == procedure && d.member == member.name())
                    .map(|d| d.value.clone())
                    .unwrap_or(Value::Null),
            };
            map.insert(name, effective)?;
        }
    }
    Ok(map)
}
