use crate::{
    ast::{Expr, InfixOperator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        lexer::Position,
        value::core::Value,
    },
    util::num::promote_integer,
};

impl Evaluator {
    /// Evaluates an infix expression.
    ///
    /// `&&` and `||` are handed to the short-circuit logic before the right
    /// operand is evaluated. Every other operator evaluates both operands,
    /// left first, and applies [`Evaluator::eval_binary`].
    pub(in crate::interpreter::evaluator) fn eval_infix(&mut self,
                                                        left: &Expr,
                                                        op: InfixOperator,
                                                        right: &Expr,
                                                        env: &Environment,
                                                        position: Position)
                                                        -> EvalResult<Value> {
        if matches!(op, InfixOperator::And | InfixOperator::Or) {
            return self.eval_logical(left, op, right, env);
        }

        let left = self.eval_expression(left, env)?;
        let right = self.eval_expression(right, env)?;
        Ok(Self::eval_binary(op, &left, &right, position)?)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// The operation is routed by operand types:
    /// - two integers use checked integer arithmetic,
    /// - an integer and a float promote the integer and use float arithmetic,
    /// - two strings use string concatenation and comparison,
    /// - anything else is an error.
    ///
    /// `==` and `!=` are decided first for every pair by structural
    /// equality, under which an integer equals a float of the same value.
    ///
    /// # Parameters
    /// - `op`: The operator. `&&` and `||` are not expected here; if they are
    ///   passed they are applied to the truthiness of both operands.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Errors
    /// - `TypeMismatch` when the operand types differ and no rule applies.
    /// - `UnknownInfixOperator` when the operand types agree but the operator
    ///   is not defined for them.
    /// - Arithmetic errors from the numeric handlers.
    ///
    /// # Example
    /// ```
    /// use jet::{
    ///     ast::InfixOperator,
    ///     interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
    /// };
    ///
    /// let at = Position::default();
    ///
    /// let sum = Evaluator::eval_binary(InfixOperator::Add, &Value::Integer(3), &Value::Float(0.5), at);
    /// assert_eq!(sum, Ok(Value::Float(3.5)));
    ///
    /// let error = Evaluator::eval_binary(InfixOperator::Add, &Value::Integer(1), &Value::Boolean(true), at)
    ///     .unwrap_err();
    /// assert_eq!(error.to_string(), "line 1, column 1: type mismatch: INTEGER + BOOLEAN.");
    /// ```
    pub fn eval_binary(op: InfixOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> Result<Value, RuntimeError> {
        use Value::{Float, Integer, Str};

        match op {
            InfixOperator::Equal => return Ok(Value::Boolean(left == right)),
            InfixOperator::NotEqual => return Ok(Value::Boolean(left != right)),
            _ => {},
        }

        match (left, right) {
            (Integer(a), Integer(b)) => Self::eval_integer_op(op, *a, *b, position),
            (Float(a), Float(b)) => Self::eval_float_op(op, *a, *b, position),
            (Integer(a), Float(b)) => Self::eval_float_op(op, promote_integer(*a, position)?, *b, position),
            (Float(a), Integer(b)) => Self::eval_float_op(op, *a, promote_integer(*b, position)?, position),
            (Str(a), Str(b)) => Self::eval_string_op(op, a, b, position),
            _ => match op {
                InfixOperator::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
                InfixOperator::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
                _ => Err(Self::operator_error(op, left, right, position)),
            },
        }
    }

    /// Builds the error for an operator with no rule for its operands.
    pub(in crate::interpreter::evaluator) fn operator_error(op: InfixOperator,
                                                            left: &Value,
                                                            right: &Value,
                                                            position: Position)
                                                            -> RuntimeError {
        let (left, right) = (left.type_name(), right.type_name());

        if left == right {
            RuntimeError::UnknownInfixOperator { left,
                                                 op,
                                                 right,
                                                 position }
        } else {
            RuntimeError::TypeMismatch { left,
                                         op,
                                         right,
                                         position }
        }
    }
}
