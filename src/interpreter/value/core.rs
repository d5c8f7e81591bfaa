use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{
    interpreter::{
        evaluator::function::builtin::BuiltinDef,
        value::{function::Function, hash_key::HashKey},
    },
    util::num::f64_to_i64_exact,
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to one of these. Collections are immutable
/// once built and share their storage, so copying a value is cheap; builtins
/// such as `push` return a new collection instead of modifying the old one.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// A UTF-8 string.
    Str(String),
    /// The absence of a value. Produced by `null`, by blocks without an
    /// expression statement, and by failed lookups in collections.
    Null,
    /// A user function closing over its defining environment.
    Function(Function),
    /// A primitive operation provided by the interpreter.
    Builtin(&'static BuiltinDef),
    /// An ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// A mapping from scalar keys to values, iterated in key order.
    Hash(Rc<BTreeMap<HashKey, Self>>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<BTreeMap<HashKey, Self>> for Value {
    fn from(v: BTreeMap<HashKey, Self>) -> Self {
        Self::Hash(Rc::new(v))
    }
}

impl Value {
    /// The upper-case type name used in error messages.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(5).type_name(), "INTEGER");
    /// assert_eq!(Value::from("hi").type_name(), "STRING");
    /// assert_eq!(Value::Null.type_name(), "NULL");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Boolean(_) => "BOOLEAN",
            Self::Str(_) => "STRING",
            Self::Null => "NULL",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
        }
    }

    /// Truthiness used by conditionals and logical operators: `false` and
    /// `null` are falsy, everything else is truthy.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::Boolean(false).is_truthy());
    /// assert!(Value::Integer(0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    /// Returns `true` for integers and floats.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// The human-readable rendering printed by the REPL.
    ///
    /// Strings print without quotes at the top level and with quotes inside
    /// collections, so `["a"]` and `"a"` stay distinguishable.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::value::core::Value;
    ///
    /// let array = Value::from(vec![Value::Integer(1), Value::from("a"), Value::Float(2.0)]);
    ///
    /// assert_eq!(array.inspect(), "[1, \"a\", 2.0]");
    /// assert_eq!(Value::from("a").inspect(), "a");
    /// ```
    #[must_use]
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Structural equality for scalars and collections, identity for functions
/// and builtins.
///
/// An integer equals a float holding exactly the same number, at any depth,
/// so `[1] == [1.0]` agrees with `1 == 1.0`. Other values of different types
/// are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(x)) | (Self::Float(x), Self::Integer(i)) => {
                f64_to_i64_exact(*x) == Some(*i)
            },
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Builtin(a), Self::Builtin(b)) => std::ptr::eq(*a, *b),
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Builtin(def) => write!(f, "builtin function {}", def.name),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    element.fmt_nested(f)?;
                }
                write!(f, "]")
            },
            Self::Hash(pairs) => {
                write!(f, "{{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.fmt_nested(f)?;
                }
                write!(f, "}}")
            },
        }
    }
}
