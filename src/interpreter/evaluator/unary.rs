use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
};

impl Evaluator {
    /// Evaluates a prefix operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation of integers (checked) and floats.
    /// - `Not`: the inverse of the operand's truthiness, for any operand.
    ///
    /// # Parameters
    /// - `op`: Prefix operator.
    /// - `value`: The evaluated operand.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Errors
    /// - `UnknownPrefixOperator` when negating a non-numeric value.
    /// - `Overflow` when negating `i64::MIN`.
    ///
    /// # Example
    /// ```
    /// use jet::{
    ///     ast::PrefixOperator,
    ///     interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    ///
    /// let v = Evaluator::eval_prefix(PrefixOperator::Negate, &Value::Integer(5), at).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Evaluator::eval_prefix(PrefixOperator::Not, &Value::Null, at).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    ///
    /// let err = Evaluator::eval_prefix(PrefixOperator::Negate, &Value::Boolean(true), at);
    /// assert!(err.is_err());
    /// ```
    pub fn eval_prefix(op: PrefixOperator,
                       value: &Value,
                       position: Position)
                       -> Result<Value, RuntimeError> {
        match op {
            PrefixOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
            PrefixOperator::Negate => match value {
                Value::Integer(n) => {
                    n.checked_neg()
                     .map(Value::Integer)
                     .ok_or(RuntimeError::Overflow { position })
                },
                Value::Float(x) => Ok(Value::Float(-x)),
                _ => Err(RuntimeError::UnknownPrefixOperator { op,
                                                               operand: value.type_name(),
                                                               position }),
            },
        }
    }
}
