//! Commands and their bound parameters.
//!
//! Parameter names always carry the `@` marker. Callers may pass names with or without it.
//!
//! List values are expanded into one parameter per element, and the list's name in the command
//! text is replaced by the comma-joined element names:
//!
//! ```
//! let mut cmd = bindery::command("SELECT * FROM t WHERE id IN (@ids)");
//! cmd.add_parameter("ids", vec![7, 9])?;
//! assert_eq!(cmd.sql(), "SELECT * FROM t WHERE id IN (@ids0,@ids1)");
//! assert_eq!(cmd.parameters().len(), 2);
//! # Ok::<(), bindery::Error>(())
//! ```
use std::borrow::Cow;

use indexmap::{IndexMap, map::Entry};

use crate::{
    Error, Result, Value,
    binding::{self, ProcedureParameters},
    encode::Encode,
    values::ToValues,
};

/// Prefix carried by every parameter name.
pub const PARAMETER_MARKER: char = '@';

/// Returns `name` with the parameter marker, adding it if missing.
pub fn marked(name: &str) -> Cow<'_, str> {
    if name.starts_with(PARAMETER_MARKER) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{PARAMETER_MARKER}{name}"))
    }
}

/// An ordered set of marked parameter names and their values. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(IndexMap<String, Value>);

/// A resolved name to value table, ready to be applied to a [`Command`].
pub type ParameterMap = Parameters;

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Fails with [`Error::DuplicateParameter`] if the marked name is taken.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Encode) -> Result<()> {
        match self.0.entry(marked(name.as_ref()).into_owned()) {
            Entry::Occupied(e) => Err(Error::DuplicateParameter(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(value.encode());
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(&*marked(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&*marked(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over names and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl IntoIterator for Parameters {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Whether a command's text is SQL or the name of a stored procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandKind {
    #[default]
    Text,
    StoredProcedure,
}

/// A command to be executed, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    text: String,
    kind: CommandKind,
    parameters: Parameters,
}

/// Create a raw SQL command.
pub fn command(sql: impl Into<String>) -> Command {
    Command::text(sql)
}

/// Create a stored procedure command.
pub fn procedure(name: impl Into<String>) -> Command {
    Command::procedure(name)
}

impl Command {
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            text: sql.into(),
            kind: CommandKind::Text,
            parameters: Parameters::new(),
        }
    }

    pub fn procedure(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            kind: CommandKind::StoredProcedure,
            parameters: Parameters::new(),
        }
    }

    /// The command text: SQL, or the procedure name.
    pub fn sql(&self) -> &str {
        &self.text
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.text = sql.into();
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: CommandKind) {
        self.kind = kind;
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Bind one value. `None` binds as `NULL`; lists are expanded.
    pub fn add_parameter(&mut self, name: &str, value: impl Encode) -> Result<()> {
        self.apply([(name, value.encode())])
    }

    /// Bind `value` unless its text form is blank. Returns whether it was bound.
    pub fn add_parameter_if_not_null(&mut self, name: &str, value: impl Encode) -> Result<bool> {
        let value = value.encode();
        if value.is_blank() {
            return Ok(false);
        }
        self.apply([(name, value)])?;
        Ok(true)
    }

    /// Expand `values` into `name0 .. nameN` and rewrite `name` in the command text. `None` is
    /// a no-op.
    pub fn add_parameter_list<T>(&mut self, name: &str, values: impl Into<Option<Vec<T>>>) -> Result<()>
    where
        T: Encode,
    {
        match values.into() {
            Some(values) => self.add_parameter(name, values),
            None => Ok(()),
        }
    }

    /// Bind every name-value pair.
    ///
    /// Either all pairs are bound or, on error, the command is left unchanged.
    pub fn apply<I, K>(&mut self, parameters: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut text = Cow::Borrowed(self.text.as_str());
        let mut bound = self.parameters.clone();
        for (name, value) in parameters {
            let name = marked(name.as_ref());
            match value {
                Value::List(items) => {
                    let expanded = expand(&mut bound, &name, items)?;
                    text = Cow::Owned(text.replace(&*name, &expanded));
                }
                value => bound.insert(name, value)?,
            }
        }
        if let Cow::Owned(text) = text {
            self.text = text;
        }
        self.parameters = bound;
        Ok(())
    }

    /// Bind every value produced by `source`.
    pub fn add_parameters<T>(&mut self, source: &T) -> Result<()>
    where
        T: ToValues + ?Sized,
    {
        self.apply(source.to_values())
    }

    /// Bind every value produced by `source` except those named in `exclude`.
    pub fn add_parameters_excluding<T>(&mut self, source: &T, exclude: &[&str]) -> Result<()>
    where
        T: ToValues + ?Sized,
    {
        let exclude: Vec<_> = exclude.iter().map(|n| marked(n)).collect();
        self.apply(
            source
                .to_values()
                .into_iter()
                .filter(|(name, _)| !exclude.contains(&marked(name))),
        )
    }

    /// Bind the parameters `source` declares for this procedure.
    ///
    /// Fails with [`Error::Configuration`] unless this is a stored procedure command.
    pub fn add_procedure_parameters<P>(&mut self, source: &P) -> Result<()>
    where
        P: ProcedureParameters,
    {
        if self.kind != CommandKind::StoredProcedure {
            return Err(Error::Configuration(format!(
                "procedure parameters require a stored procedure command, got text command `{}`",
                self.text
            )));
        }
        let map = binding::resolve(&self.text, source)?;
        self.apply(map)
    }
}

// Bind each item as `{name}{i}` and return the comma-joined names.
fn expand(parameters: &mut Parameters, name: &str, items: Vec<Value>) -> Result<String> {
    if items.is_empty() {
        tracing::warn!(parameter = name, "expanding an empty list");
    }
    let mut names = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let expanded = format!("{name}{i}");
        parameters.insert(&expanded, item)?;
        names.push(expanded);
    }
    Ok(names.join(","))
}

impl From<&str> for Command {
    fn from(sql: &str) -> Self {
        Command::text(sql)
    }
}

impl From<String> for Command {
    fn from(sql: String) -> Self {
        Command::text(sql)
    }
}
