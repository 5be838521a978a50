use std::{collections::HashMap, str::FromStr, sync::Arc};

use crate::{Error, Result, Value, parser};

/// A named column in a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) ordinal: usize,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

#[derive(Debug)]
struct Schema {
    columns: Vec<Column>,
    names: HashMap<String, usize>,
}

/// A single row of a [`RowSet`].
#[derive(Debug, Clone)]
pub struct Row {
    values: Box<[Value]>,
    schema: Arc<Schema>,
}

impl Row {
    /// Returns the values for this row.
    pub fn values(&self) -> &[Value] {
        self.values.as_ref()
    }

    /// Returns the column definitions for this row.
    pub fn columns(&self) -> &[Column] {
        &self.schema.columns
    }

    /// Returns `true` if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if the row schema has a column called `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.schema.names.contains_key(column)
    }

    /// Get a single value from the row by column index.
    pub fn get_value_idx(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(Error::ColumnIndexOutOfBounds {
            index,
            len: self.values.len(),
        })
    }

    /// Get a single value from the row by column name.
    pub fn get_value(&self, column: &str) -> Result<&Value> {
        self.try_get_value(column)
            .ok_or_else(|| Error::ColumnNotFound(column.into()))
    }

    fn try_get_value(&self, column: &str) -> Option<&Value> {
        let index = *self.schema.names.get(column)?;
        self.values.get(index)
    }

    /// The string form of a column. `NULL` is the empty string.
    pub fn get_string(&self, column: &str) -> Result<String> {
        self.get_value(column).map(ToString::to_string)
    }

    /// Like [`Row::get_string`], but `None` if the column does not exist.
    pub fn try_get_string(&self, column: &str) -> Option<String> {
        self.try_get_value(column).map(ToString::to_string)
    }

    /// Parse a column as `T` through the parser registry.
    ///
    /// `bool` and `Option<bool>` columns holding an integer are `true` only for `1`; other
    /// text falls back to `true`/`false` parsing. Unparseable values follow the usual rule of
    /// `None` or the zero value of `T`.
    ///
    /// ```
    /// # use bindery::{RowSet, Value};
    /// let mut rows = RowSet::new(["active", "score"]);
    /// rows.push(vec![Value::Int(1), Value::Text("n/a".into())])?;
    /// let row = rows.first().unwrap();
    /// assert!(row.parse::<bool>("active")?);
    /// assert_eq!(row.parse::<Option<i32>>("score")?, None);
    /// # Ok::<(), bindery::Error>(())
    /// ```
    pub fn parse<T: 'static>(&self, column: &str) -> Result<T> {
        let parser = parser::column_parser::<T>()?;
        let value = self.get_value(column)?;
        Ok(parser.parse(&value.to_string()))
    }

    /// Parse a column as `T`, returning `Ok(None)` if the column does not exist.
    ///
    /// A column that exists but holds `NULL` or unparseable text is `Ok(Some(..))` of whatever
    /// the parser yields for it.
    pub fn try_parse<T: 'static>(&self, column: &str) -> Result<Option<T>> {
        let parser = parser::column_parser::<T>()?;
        Ok(self
            .try_get_value(column)
            .map(|value| parser.parse(&value.to_string())))
    }

    /// Read an integer column and convert it to `E`, falling back to `default` when the column
    /// is blank, unparseable, or holds no matching discriminant.
    pub fn parse_enum_from_int<E>(&self, column: &str, default: E) -> Result<E>
    where
        E: TryFrom<i32>,
    {
        let value = self.parse::<Option<i32>>(column)?;
        Ok(value.and_then(|v| E::try_from(v).ok()).unwrap_or(default))
    }

    /// Read a text column and convert it to `E` with [`FromStr`], falling back to `default`.
    pub fn parse_enum_from_str<E>(&self, column: &str, default: E) -> Result<E>
    where
        E: FromStr,
    {
        let value = self.parse::<Option<String>>(column)?;
        Ok(value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default))
    }
}

/// An ordered set of rows sharing one schema.
#[derive(Debug, Clone)]
pub struct RowSet {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl RowSet {
    /// Create an empty row set with the given column names. Later duplicates of a name are
    /// reachable by index only.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<Column> = columns
            .into_iter()
            .enumerate()
            .map(|(ordinal, name)| Column {
                name: name.into(),
                ordinal,
            })
            .collect();
        let mut names = HashMap::with_capacity(columns.len());
        for c in &columns {
            names.entry(c.name.clone()).or_insert(c.ordinal);
        }
        Self {
            schema: Arc::new(Schema { columns, names }),
            rows: Vec::new(),
        }
    }

    /// Append a row. The number of values must match the number of columns.
    pub fn push(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.schema.columns.len() {
            return Err(Error::Protocol(format!(
                "row has {} values but the result set has {} columns",
                values.len(),
                self.schema.columns.len()
            )));
        }
        self.rows.push(Row {
            values: values.into_boxed_slice(),
            schema: Arc::clone(&self.schema),
        });
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.schema.columns
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A type that can be built from a single [`Row`].
///
/// Usually derived:
///
/// ```
/// use bindery::{FromRow, RowSet, Value};
///
/// #[derive(FromRow)]
/// struct Account {
///     #[bindery(column = "account_id")]
///     id: i64,
///     name: Option<String>,
/// }
///
/// let mut rows = RowSet::new(["account_id", "name"]);
/// rows.push(vec![Value::Int64(7), Value::Null])?;
/// let account = Account::from_row(rows.first().unwrap())?;
/// assert_eq!(account.id, 7);
/// assert_eq!(account.name, None);
/// # Ok::<(), bindery::Error>(())
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(row.clone())
    }
}
