use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use bindery::{Command, Database, Error, RowSet, Value};

#[doc(hidden)]
pub use paste;

/// Build a result set from column names and rows of values.
pub fn rows<const N: usize>(columns: [&str; N], values: Vec<[Value; N]>) -> anyhow::Result<RowSet> {
    let mut set = RowSet::new(columns);
    for row in values {
        set.push(row.into())?;
    }
    Ok(set)
}

/// Text shorthand for fixtures.
pub fn text(v: &str) -> Value {
    Value::Text(v.into())
}

#[derive(Debug)]
enum Scripted {
    Rows(RowSet),
    Scalar(Value),
    Affected(u64),
    Failure(String),
}

#[derive(Debug, Default)]
struct State {
    queue: VecDeque<Scripted>,
    commands: Vec<Command>,
}

/// An in-memory [`Database`] that replays scripted results and records every command it is
/// asked to run.
///
/// Results are consumed in the order they were pushed, whatever method runs next. With nothing
/// queued, `fill` returns an empty result set, `execute_scalar` returns `NULL`, and
/// `execute_non_query` reports zero rows.
#[derive(Debug, Default)]
pub struct MockDatabase {
    state: Mutex<State>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_rows(&self, rows: RowSet) {
        self.state().queue.push_back(Scripted::Rows(rows));
    }

    pub fn push_scalar(&self, value: Value) {
        self.state().queue.push_back(Scripted::Scalar(value));
    }

    pub fn push_affected(&self, n: u64) {
        self.state().queue.push_back(Scripted::Affected(n));
    }

    /// Queue a driver failure.
    pub fn push_error(&self, message: &str) {
        self.state()
            .queue
            .push_back(Scripted::Failure(message.to_string()));
    }

    /// Every command run so far, oldest first.
    pub fn commands(&self) -> Vec<Command> {
        self.state().commands.clone()
    }

    /// The most recent command.
    pub fn last_command(&self) -> Option<Command> {
        self.state().commands.last().cloned()
    }

    fn next(&self, command: &Command) -> Option<Scripted> {
        let mut state = self.state();
        state.commands.push(command.clone());
        state.queue.pop_front()
    }
}

fn unexpected(expected: &str, got: Scripted) -> Error {
    match got {
        Scripted::Failure(message) => Error::database(std::io::Error::other(message)),
        other => Error::Protocol(format!("mock expected {expected}, next scripted result is {other:?}")),
    }
}

impl Database for MockDatabase {
    fn execute_non_query(&self, command: &Command) -> bindery::Result<u64> {
        match self.next(command) {
            None => Ok(0),
            Some(Scripted::Affected(n)) => Ok(n),
            Some(other) => Err(unexpected("an affected count", other)),
        }
    }

    fn execute_scalar(&self, command: &Command) -> bindery::Result<Value> {
        match self.next(command) {
            None => Ok(Value::Null),
            Some(Scripted::Scalar(v)) => Ok(v),
            Some(other) => Err(unexpected("a scalar", other)),
        }
    }

    fn fill(&self, command: &Command) -> bindery::Result<RowSet> {
        match self.next(command) {
            None => Ok(RowSet::new(std::iter::empty::<&str>())),
            Some(Scripted::Rows(rows)) => Ok(rows),
            Some(other) => Err(unexpected("a result set", other)),
        }
    }
}

// Test text parsing, both through the text registry and through a single-column row
#[macro_export]
macro_rules! test_parse {
    ($name:ident<$ty:ty>($($text:literal == $value:expr),+ $(,)?)) => {
        $crate::paste::item! {
            #[test]
            fn [< test_parse_ $name >] () -> anyhow::Result<()> {
                $(
                    let parsed = bindery::parser::parse::<$ty>($text)?;
                    assert_eq!(parsed, $value, "parsing {:?}", $text);

                    let rows = $crate::rows(["v"], vec![[$crate::text($text)]])?;
                    let row = rows.first().ok_or(bindery::Error::RowNotFound)?;
                    assert_eq!(row.parse::<$ty>("v")?, $value, "parsing column {:?}", $text);
                )+
                Ok(())
            }
        }
    };
}
