use std::fmt;

use ordered_float::OrderedFloat;

use crate::{interpreter::value::core::Value, util::num::f64_to_i64_exact};

/// Enum representing values allowed as hash keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    /// `null`
    Null,
    /// A boolean such as `true`.
    Boolean(bool),
    /// An integer such as `-4` or `42`.
    Integer(i64),
    /// A float with a fractional part such as `2.5`, or a non-finite one.
    Float(OrderedFloat<f64>),
    /// A string such as `"name"`.
    Str(String),
}

impl HashKey {
    /// Converts a value into a key, or `None` if the value's type cannot be
    /// used as a key.
    ///
    /// A float holding an integral value becomes an integer key, so `1` and
    /// `1.0` address the same entry just as they compare equal.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::value::{core::Value, hash_key::HashKey};
    ///
    /// assert_eq!(HashKey::from_value(&Value::Integer(1)), Some(HashKey::Integer(1)));
    /// assert_eq!(HashKey::from_value(&Value::Float(1.0)), Some(HashKey::Integer(1)));
    /// assert_eq!(HashKey::from_value(&Value::from(vec![])), None);
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Boolean(b) => Some(Self::Boolean(*b)),
            Value::Integer(i) => Some(Self::Integer(*i)),
            Value::Float(f) => {
                Some(f64_to_i64_exact(*f).map_or(Self::Float(OrderedFloat(*f)), Self::Integer))
            },
            Value::Str(s) => Some(Self::Str(s.clone())),
            Value::Function(_) | Value::Builtin(_) | Value::Array(_) | Value::Hash(_) => None,
        }
    }
}

impl From<HashKey> for Value {
    fn from(key: HashKey) -> Self {
        match key {
            HashKey::Null => Self::Null,
            HashKey::Boolean(b) => Self::Boolean(b),
            HashKey::Integer(i) => Self::Integer(i),
            HashKey::Float(f) => Self::Float(f.into_inner()),
            HashKey::Str(s) => Self::Str(s),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{:?}", x.into_inner()),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}
