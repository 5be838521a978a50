use std::{rc::Rc, sync::Arc};

use crate::{Result, Value, command::Command, row::RowSet};

/// A database that can run [`Command`]s.
///
/// Implementations bind the command's parameters, run it, and release any resources they
/// acquired before returning. Driver failures are reported as [`Error::Database`].
///
/// [`Error::Database`]: crate::Error::Database
pub trait Database {
    /// Run a command that returns no rows. Returns the number of rows affected.
    fn execute_non_query(&self, command: &Command) -> Result<u64>;

    /// Run a command and return the first column of its first row, or `Value::Null`.
    fn execute_scalar(&self, command: &Command) -> Result<Value>;

    /// Run a command and collect its result set.
    fn fill(&self, command: &Command) -> Result<RowSet>;
}

macro_rules! forward_database {
    ($($ty:ty),+) => {$(
        impl<D: Database + ?Sized> Database for $ty {
            fn execute_non_query(&self, command: &Command) -> Result<u64> {
                (**self).execute_non_query(command)
            }

            fn execute_scalar(&self, command: &Command) -> Result<Value> {
                (**self).execute_scalar(command)
            }

            fn fill(&self, command: &Command) -> Result<RowSet> {
                (**self).fill(command)
            }
        }
    )+};
}

forward_database!(&D, Box<D>, Rc<D>, Arc<D>);

/// A set of named connection strings, from which a [`Database`] is chosen when building a
/// facade with [`FacadeOptions::connect`](crate::FacadeOptions::connect).
pub trait ConnectionStrings {}
