//! A thin facade that runs commands against a [`Database`] and hands the results to parse
//! functions.
//!
//! Every method takes a command (anything convertible to [`Command`]; plain `&str` is raw SQL,
//! [`procedure`](crate::procedure) builds a stored procedure call) and a `parameterize` closure
//! that binds parameters before the command runs.
//!
//! ```
//! use bindery::{DatabaseFacade, RowSet, Value, procedure};
//! use bindery_test::MockDatabase;
//!
//! let db = MockDatabase::new();
//! let mut rows = RowSet::new(["name"]);
//! rows.push(vec![Value::Text("ann".into())])?;
//! db.push_rows(rows);
//!
//! let facade = DatabaseFacade::new(db);
//! let names = facade.fetch_rows(
//!     procedure("dbo.ListUsers"),
//!     |cmd| cmd.add_parameter("active", true),
//!     |row| row.parse::<String>("name"),
//! )?;
//! assert_eq!(names, ["ann"]);
//! # Ok::<(), bindery::Error>(())
//! ```
use std::{collections::HashMap, fmt::Debug, hash::Hash, time::Duration};

use log::LevelFilter;

use crate::{
    Error, Result,
    command::Command,
    database::{ConnectionStrings, Database},
    logger::{CommandLogger, LogSettings},
    parser,
    row::{FromRow, Row, RowSet},
};

/// Options for building a [`DatabaseFacade`].
#[derive(Clone, Debug, Default)]
pub struct FacadeOptions {
    pub(crate) log_settings: LogSettings,
}

impl FacadeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log_statements(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_statements(level);
        self
    }

    #[must_use]
    pub fn log_slow_statements(mut self, level: LevelFilter, duration: Duration) -> Self {
        self.log_settings.log_slow_statements(level, duration);
        self
    }

    #[must_use]
    pub fn disable_logging(mut self) -> Self {
        self.log_settings.log_statements(LevelFilter::Off);
        self.log_settings
            .log_slow_statements(LevelFilter::Off, Duration::MAX);
        self
    }

    pub fn log_settings(&self) -> &LogSettings {
        &self.log_settings
    }

    /// Wrap an open database.
    pub fn open<D: Database>(&self, database: D) -> DatabaseFacade<D> {
        DatabaseFacade {
            database,
            log_settings: self.log_settings.clone(),
        }
    }

    /// Choose and open a database from a set of connection strings.
    pub fn connect<C, D, F>(&self, strings: &C, open: F) -> Result<DatabaseFacade<D>>
    where
        C: ConnectionStrings + ?Sized,
        D: Database,
        F: FnOnce(&C) -> Result<D>,
    {
        Ok(self.open(open(strings)?))
    }
}

/// A `parameterize` closure that binds nothing.
pub fn no_parameters(_: &mut Command) -> Result<()> {
    Ok(())
}

/// Runs commands and parses their results.
#[derive(Debug)]
pub struct DatabaseFacade<D> {
    database: D,
    log_settings: LogSettings,
}

impl<D: Database> DatabaseFacade<D> {
    /// Wrap `database` with default options.
    pub fn new(database: D) -> Self {
        FacadeOptions::default().open(database)
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn into_inner(self) -> D {
        self.database
    }

    fn prepare<P>(&self, command: impl Into<Command>, parameterize: P) -> Result<Command>
    where
        P: FnOnce(&mut Command) -> Result<()>,
    {
        let mut command = command.into();
        parameterize(&mut command)?;
        Ok(command)
    }

    fn fill<P>(&self, command: impl Into<Command>, parameterize: P) -> Result<RowSet>
    where
        P: FnOnce(&mut Command) -> Result<()>,
    {
        let command = self.prepare(command, parameterize)?;
        let mut logger = CommandLogger::new(&command, self.log_settings.clone());
        let rows = self.database.fill(&command)?;
        logger.increase_rows_returned(rows.len() as u64);
        Ok(rows)
    }

    /// Parse the whole result set. Fails with [`Error::RowNotFound`] if it is empty.
    pub fn first<T, P, F>(&self, command: impl Into<Command>, parameterize: P, parse: F) -> Result<T>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&RowSet) -> Result<T>,
    {
        self.first_or_default(command, parameterize, parse)?
            .ok_or(Error::RowNotFound)
    }

    /// Parse the whole result set, or return `None` if it is empty.
    pub fn first_or_default<T, P, F>(
        &self,
        command: impl Into<Command>,
        parameterize: P,
        parse: F,
    ) -> Result<Option<T>>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&RowSet) -> Result<T>,
    {
        let rows = self.fill(command, parameterize)?;
        if rows.is_empty() {
            return Ok(None);
        }
        parse(&rows).map(Some)
    }

    /// Parse the first row. Fails with [`Error::RowNotFound`] if there is none.
    pub fn first_row<T, P, F>(&self, command: impl Into<Command>, parameterize: P, parse: F) -> Result<T>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&Row) -> Result<T>,
    {
        self.first_row_or_default(command, parameterize, parse)?
            .ok_or(Error::RowNotFound)
    }

    /// Parse the first row, or return `None` if there is none.
    pub fn first_row_or_default<T, P, F>(
        &self,
        command: impl Into<Command>,
        parameterize: P,
        parse: F,
    ) -> Result<Option<T>>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&Row) -> Result<T>,
    {
        let rows = self.fill(command, parameterize)?;
        rows.first().map(parse).transpose()
    }

    /// Parse the whole result set into a list.
    pub fn fetch<T, P, F>(&self, command: impl Into<Command>, parameterize: P, parse: F) -> Result<Vec<T>>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&RowSet) -> Result<Vec<T>>,
    {
        let rows = self.fill(command, parameterize)?;
        parse(&rows)
    }

    /// Parse each row into one list element.
    pub fn fetch_rows<T, P, F>(&self, command: impl Into<Command>, parameterize: P, parse: F) -> Result<Vec<T>>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnMut(&Row) -> Result<T>,
    {
        let rows = self.fill(command, parameterize)?;
        rows.iter().map(parse).collect()
    }

    /// Map each row with [`FromRow`].
    pub fn fetch_as<T, P>(&self, command: impl Into<Command>, parameterize: P) -> Result<Vec<T>>
    where
        T: FromRow,
        P: FnOnce(&mut Command) -> Result<()>,
    {
        self.fetch_rows(command, parameterize, T::from_row)
    }

    /// Parse the whole result set into a map.
    pub fn fetch_dictionary<K, V, P, F>(
        &self,
        command: impl Into<Command>,
        parameterize: P,
        parse: F,
    ) -> Result<HashMap<K, V>>
    where
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnOnce(&RowSet) -> Result<HashMap<K, V>>,
    {
        let rows = self.fill(command, parameterize)?;
        parse(&rows)
    }

    /// Parse each row into one map entry. Fails with [`Error::DuplicateKey`] if two rows produce
    /// the same key.
    pub fn fetch_dictionary_rows<K, V, P, F>(
        &self,
        command: impl Into<Command>,
        parameterize: P,
        mut parse: F,
    ) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash + Debug,
        P: FnOnce(&mut Command) -> Result<()>,
        F: FnMut(&Row) -> Result<(K, V)>,
    {
        let rows = self.fill(command, parameterize)?;
        let mut map = HashMap::with_capacity(rows.len());
        for row in &rows {
            let (key, value) = parse(row)?;
            if map.contains_key(&key) {
                return Err(Error::DuplicateKey(format!("{key:?}")));
            }
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Run a command that returns no rows. Returns the number of rows affected.
    pub fn execute<P>(&self, command: impl Into<Command>, parameterize: P) -> Result<u64>
    where
        P: FnOnce(&mut Command) -> Result<()>,
    {
        let command = self.prepare(command, parameterize)?;
        let mut logger = CommandLogger::new(&command, self.log_settings.clone());
        let affected = self.database.execute_non_query(&command)?;
        logger.increase_rows_affected(affected);
        Ok(affected)
    }

    /// Run a command and parse its scalar result as `T`.
    ///
    /// The scalar is rendered to its string form and parsed like any other text, so a `NULL`
    /// result is `None` or the zero value of `T`.
    pub fn execute_scalar<T, P>(&self, command: impl Into<Command>, parameterize: P) -> Result<T>
    where
        T: 'static,
        P: FnOnce(&mut Command) -> Result<()>,
    {
        let parser = parser::parser::<T>()?;
        let command = self.prepare(command, parameterize)?;
        let mut logger = CommandLogger::new(&command, self.log_settings.clone());
        let value = self.database.execute_scalar(&command)?;
        if !value.is_null() {
            logger.increase_rows_returned(1);
        }
        Ok(parser.parse(&value.to_string()))
    }
}
