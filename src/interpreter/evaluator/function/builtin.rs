use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
    util::num::usize_to_i64_checked,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluator (for its output buffer), the evaluated
/// arguments and the call position. Arity has already been checked against
/// the table when the handler runs.
pub type BuiltinFn = fn(&mut Evaluator, &[Value], Position) -> Result<Value, RuntimeError>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` means any number of arguments is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments.
    Variadic,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (the metadata a `Value::Builtin` points to),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A builtin function as seen by the evaluator.
        #[derive(Debug)]
        pub struct BuiltinDef {
            /// The name the builtin is resolved by.
            pub name:  &'static str,
            /// The accepted argument counts.
            pub arity: Arity,
            /// The implementation.
            pub func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names of all builtins, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"   => { arity: Arity::Exact(1), func: len },
    "first" => { arity: Arity::Exact(1), func: first },
    "last"  => { arity: Arity::Exact(1), func: last },
    "rest"  => { arity: Arity::Exact(1), func: rest },
    "push"  => { arity: Arity::Exact(2), func: push },
    "puts"  => { arity: Arity::Variadic, func: puts },
}

/// Finds a builtin by name.
///
/// # Example
/// ```
/// use jet::interpreter::evaluator::function::builtin::lookup_builtin;
///
/// assert_eq!(lookup_builtin("len").map(|def| def.name), Some("len"));
/// assert!(lookup_builtin("print").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|def| def.name == name)
}

fn invalid(function: &'static str, details: String, position: Position) -> RuntimeError {
    RuntimeError::InvalidArgument { function,
                                    details,
                                    position }
}

/// The error for a handler called directly with the wrong number of
/// arguments. Calls made by the evaluator are checked against the table
/// before the handler runs.
const fn arity(expected: usize, args: &[Value], position: Position) -> RuntimeError {
    RuntimeError::ArgumentCountMismatch { expected,
                                          found: args.len(),
                                          position }
}

/// Extracts the array argument of `first`, `last`, `rest` and `push`.
fn expect_array<'a>(function: &'static str,
                    value: &'a Value,
                    position: Position)
                    -> Result<&'a Rc<Vec<Value>>, RuntimeError> {
    match value {
        Value::Array(elements) => Ok(elements),
        other => Err(invalid(function,
                             format!("argument must be ARRAY, got {}", other.type_name()),
                             position)),
    }
}

/// Returns the number of characters in a string, or of elements in an array
/// or hash.
///
/// # Example
/// ```
/// use jet::interpreter::{
///     evaluator::{core::Evaluator, function::builtin::len},
///     lexer::Position,
///     value::core::Value,
/// };
///
/// let mut evaluator = Evaluator::new();
/// let n = len(&mut evaluator, &[Value::from("héllo")], Position::default()).unwrap();
///
/// assert_eq!(n, Value::Integer(5));
/// ```
pub fn len(_: &mut Evaluator, args: &[Value], position: Position) -> Result<Value, RuntimeError> {
    let [value] = args else {
        return Err(arity(1, args, position));
    };
    let count = match value {
        Value::Str(s) => s.chars().count(),
        Value::Array(elements) => elements.len(),
        Value::Hash(pairs) => pairs.len(),
        other => {
            return Err(invalid("len",
                               format!("argument not supported, got {}", other.type_name()),
                               position));
        },
    };
    Ok(Value::Integer(usize_to_i64_checked(count, position)?))
}

/// Returns the first element of an array, or `null` if it is empty.
pub fn first(_: &mut Evaluator, args: &[Value], position: Position) -> Result<Value, RuntimeError> {
    let [value] = args else {
        return Err(arity(1, args, position));
    };
    let elements = expect_array("first", value, position)?;
    Ok(elements.first().cloned().unwrap_or(Value::Null))
}

/// Returns the last element of an array, or `null` if it is empty.
pub fn last(_: &mut Evaluator, args: &[Value], position: Position) -> Result<Value, RuntimeError> {
    let [value] = args else {
        return Err(arity(1, args, position));
    };
    let elements = expect_array("last", value, position)?;
    Ok(elements.last().cloned().unwrap_or(Value::Null))
}

/// Returns a new array holding every element but the first, or `null` if
/// the array is empty.
///
/// # Example
/// ```
/// use jet::interpreter::{
///     evaluator::{core::Evaluator, function::builtin::rest},
///     lexer::Position,
///     value::core::Value,
/// };
///
/// let mut evaluator = Evaluator::new();
/// let array = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let tail = rest(&mut evaluator, &[array], Position::default()).unwrap();
/// assert_eq!(tail, Value::from(vec![Value::Integer(2)]));
/// ```
pub fn rest(_: &mut Evaluator, args: &[Value], position: Position) -> Result<Value, RuntimeError> {
    let [value] = args else {
        return Err(arity(1, args, position));
    };
    let elements = expect_array("rest", value, position)?;
    match elements.split_first() {
        Some((_, tail)) => Ok(Value::from(tail.to_vec())),
        None => Ok(Value::Null),
    }
}

/// Returns a new array with the second argument appended. The original
/// array is left unchanged.
pub fn push(_: &mut Evaluator, args: &[Value], position: Position) -> Result<Value, RuntimeError> {
    let [array, element] = args else {
        return Err(arity(2, args, position));
    };
    let elements = expect_array("push", array, position)?;
    let mut pushed = Vec::with_capacity(elements.len() + 1);
    pushed.extend(elements.iter().cloned());
    pushed.push(element.clone());
    Ok(Value::from(pushed))
}

/// Writes the inspected form of each argument to the evaluator's output
/// buffer, one line per argument, and returns `null`.
///
/// Nothing is printed here; the driver drains the buffer after evaluation.
pub fn puts(evaluator: &mut Evaluator,
            args: &[Value],
            _: Position)
            -> Result<Value, RuntimeError> {
    evaluator.output.extend(args.iter().map(Value::inspect));
    Ok(Value::Null)
}
