use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::{Value, encode::Encode};

/// An ordered collection of named values, the flattened form of a configuration object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Values(IndexMap<String, Value>);

impl Values {
    /// Creates a new, empty `Values` collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-value pair into the collection, replacing any earlier value for `key`
    /// in place.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Encode,
    {
        self.0.insert(key.into(), value.encode());
    }

    /// Consumes `self`, inserts a key-value pair, and returns `Self` for chaining.
    pub fn val<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Encode,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the collection contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of elements in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterate over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Encode,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// A type that can be flattened into an ordered set of name-value pairs.
///
/// Implemented for [`Values`] itself, for string-keyed maps and pair lists, and derived for
/// structs with named fields:
///
/// ```
/// use bindery::{ToValues, Value};
///
/// #[derive(ToValues)]
/// #[bindery(rename_all = "camel_case")]
/// struct Search {
///     user_name: String,
///     #[bindery(skip)]
///     cache_key: u64,
/// }
///
/// let values = Search { user_name: "ann".into(), cache_key: 9 }.to_values();
/// assert_eq!(values.get("userName"), Some(&Value::Text("ann".into())));
/// assert_eq!(values.len(), 1);
/// ```
pub trait ToValues {
    fn to_values(&self) -> Values;
}

impl ToValues for Values {
    fn to_values(&self) -> Values {
        self.clone()
    }
}

impl<T: ToValues + ?Sized> ToValues for &T {
    fn to_values(&self) -> Values {
        (**self).to_values()
    }
}

impl<K, V, S> ToValues for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Encode + Clone,
{
    fn to_values(&self) -> Values {
        self.iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect()
    }
}

impl<K, V> ToValues for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Encode + Clone,
{
    fn to_values(&self) -> Values {
        self.iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect()
    }
}

impl<K, V, S> ToValues for IndexMap<K, V, S>
where
    K: AsRef<str>,
    V: Encode + Clone,
{
    fn to_values(&self) -> Values {
        self.iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect()
    }
}

impl<K, V> ToValues for [(K, V)]
where
    K: AsRef<str>,
    V: Encode + Clone,
{
    fn to_values(&self) -> Values {
        self.iter()
            .map(|(k, v)| (k.as_ref(), v.clone()))
            .collect()
    }
}

impl<K, V> ToValues for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Encode + Clone,
{
    fn to_values(&self) -> Values {
        self.as_slice().to_values()
    }
}

/// Build a [`Values`] from `"name": value` pairs.
///
/// ```
/// let v = bindery::values! { "id": 1, "name": "Alice", "tags": vec!["a", "b"] };
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.keys().next().map(String::as_str), Some("id"));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::Values::new()
    };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut values = $crate::Values::new();
        $(values.insert($key, $value);)+
        values
    }};
}
