use crate::{
    ast::{InfixOperator, PrefixOperator},
    interpreter::lexer::Position,
};

/// Represents all errors that can occur during evaluation.
///
/// A runtime error aborts the evaluation chain it occurs in and bubbles up to
/// the caller of the evaluator; the session and its environment stay usable.
/// Type names in messages are the upper-case names returned by
/// `Value::type_name`. Messages start with the position; the driver adds the
/// `ERROR: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// An identifier is not bound in any enclosing scope and is not a
    /// builtin.
    #[error("{position}: identifier not found: {name}.")]
    UnknownIdentifier {
        /// The unresolved name.
        name:     String,
        /// Where the identifier appears.
        position: Position,
    },
    /// A reassignment targets a name with no existing binding.
    #[error("{position}: cannot assign to undefined identifier: {name}.")]
    AssignToUndefined {
        /// The unbound name.
        name:     String,
        /// Where the assignment appears.
        position: Position,
    },
    /// A binary operator was applied to operands of different types.
    #[error("{position}: type mismatch: {left} {op} {right}.")]
    TypeMismatch {
        /// Type name of the left operand.
        left:     &'static str,
        /// The operator.
        op:       InfixOperator,
        /// Type name of the right operand.
        right:    &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// A binary operator has no meaning for operands of this type.
    #[error("{position}: unknown operator: {left} {op} {right}.")]
    UnknownInfixOperator {
        /// Type name of the left operand.
        left:     &'static str,
        /// The operator.
        op:       InfixOperator,
        /// Type name of the right operand.
        right:    &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// A prefix operator has no meaning for the operand type.
    #[error("{position}: unknown operator: {op}{operand}.")]
    UnknownPrefixOperator {
        /// The operator.
        op:       PrefixOperator,
        /// Type name of the operand.
        operand:  &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// The callee of a call expression is not a function.
    #[error("{position}: not a function: {type_name}.")]
    NotCallable {
        /// Type name of the callee.
        type_name: &'static str,
        /// Position of the call.
        position:  Position,
    },
    /// A function received the wrong number of arguments.
    #[error("{position}: wrong number of arguments: expected {expected}, got {found}.")]
    ArgumentCountMismatch {
        /// Number of parameters the function declares.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// Position of the call.
        position: Position,
    },
    /// The indexed value does not support the given index type.
    #[error("{position}: index operator not supported: {left}[{index}].")]
    IndexNotSupported {
        /// Type name of the indexed value.
        left:     &'static str,
        /// Type name of the index.
        index:    &'static str,
        /// Position of the index expression.
        position: Position,
    },
    /// A value that cannot be hashed was used as a hash key.
    #[error("{position}: unusable as hash key: {type_name}.")]
    UnusableHashKey {
        /// Type name of the rejected key.
        type_name: &'static str,
        /// Position of the hash literal or index expression.
        position:  Position,
    },
    /// Attempted division or remainder by zero.
    #[error("{position}: division by zero.")]
    DivisionByZero {
        /// Position of the operator.
        position: Position,
    },
    /// Integer arithmetic overflowed.
    #[error("{position}: integer overflow.")]
    Overflow {
        /// Position of the operation.
        position: Position,
    },
    /// An integer could not be promoted to a float without losing precision.
    #[error("{position}: integer {value} cannot be represented exactly as a float.")]
    PrecisionLoss {
        /// The integer being promoted.
        value:    i64,
        /// Position of the operation.
        position: Position,
    },
    /// A builtin received an argument it does not support.
    #[error("{position}: invalid argument to `{function}`: {details}.")]
    InvalidArgument {
        /// The builtin's name.
        function: &'static str,
        /// Why the argument was rejected.
        details:  String,
        /// Position of the call.
        position: Position,
    },
    /// Too many nested calls are active.
    #[error("{position}: maximum call depth of {limit} exceeded.")]
    CallDepthExceeded {
        /// The configured limit.
        limit:    usize,
        /// Position of the call that exceeded it.
        position: Position,
    },
}
