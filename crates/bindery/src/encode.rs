//! Provides [`Encode`] for turning Rust values into parameter [`Value`]s.
use crate::Value;

/// Encode a single value so it can be bound to a command.
pub trait Encode {
    /// Convert `self` into a [`Value`], consuming it.
    fn encode(self) -> Value;
}

impl Encode for Value {
    fn encode(self) -> Value {
        self
    }
}

// Borrowed values are encoded through a clone so derived impls can read fields in place.
impl<T> Encode for &T
where
    T: Encode + Clone,
{
    fn encode(self) -> Value {
        self.clone().encode()
    }
}

impl<T> Encode for Option<T>
where
    T: Encode,
{
    fn encode(self) -> Value {
        match self {
            Some(v) => v.encode(),
            None => Value::Null,
        }
    }
}

impl<T> Encode for Vec<T>
where
    T: Encode,
{
    fn encode(self) -> Value {
        Value::List(self.into_iter().map(Encode::encode).collect())
    }
}

impl<T> Encode for &[T]
where
    T: Encode + Clone,
{
    fn encode(self) -> Value {
        Value::List(self.iter().cloned().map(Encode::encode).collect())
    }
}

impl<T, const N: usize> Encode for [T; N]
where
    T: Encode,
{
    fn encode(self) -> Value {
        Value::List(self.into_iter().map(Encode::encode).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_encodes_null() {
        assert_eq!(None::<i32>.encode(), Value::Null);
        assert_eq!(Some(7i32).encode(), Value::Int(7));
    }

    #[test]
    fn sequences_encode_as_lists() {
        assert_eq!(
            vec![1i32, 2].encode(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        let slice: &[i64] = &[5, 6];
        assert_eq!(
            slice.encode(),
            Value::List(vec![Value::Int64(5), Value::Int64(6)])
        );
        assert_eq!(["a", "b"].encode().kind(), "list");
    }

    #[test]
    fn reference_encode() {
        let value = String::from("hello");
        assert_eq!((&value).encode(), Value::Text("hello".into()));
        assert_eq!(value, "hello");
    }
}
