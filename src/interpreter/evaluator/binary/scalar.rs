use crate::{
    ast::InfixOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
};

impl Evaluator {
    /// Evaluates an operator on two integers.
    ///
    /// Arithmetic is checked: results that do not fit in an `i64` raise
    /// `Overflow` instead of wrapping. `/` truncates toward zero and `%` takes
    /// the sign of the dividend.
    ///
    /// # Errors
    /// - `DivisionByZero` for `/` or `%` by zero.
    /// - `Overflow` when the result does not fit.
    pub(in crate::interpreter::evaluator) fn eval_integer_op(op: InfixOperator,
                                                             a: i64,
                                                             b: i64,
                                                             position: Position)
                                                             -> Result<Value, RuntimeError> {
        if let Some(result) = Self::compare(op, &a, &b) {
            return Ok(Value::Boolean(result));
        }

        let result = match op {
            InfixOperator::Add => a.checked_add(b),
            InfixOperator::Sub => a.checked_sub(b),
            InfixOperator::Mul => a.checked_mul(b),
            InfixOperator::Div | InfixOperator::Mod if b == 0 => {
                return Err(RuntimeError::DivisionByZero { position });
            },
            InfixOperator::Div => a.checked_div(b),
            InfixOperator::Mod => a.checked_rem(b),
            InfixOperator::Pow => return Self::eval_integer_pow(a, b, position),
            // Both operands are integers, and integers are truthy.
            _ => return Ok(Value::Boolean(true)),
        };

        result.map(Value::Integer)
              .ok_or(RuntimeError::Overflow { position })
    }

    /// Evaluates an operator on two floats.
    ///
    /// # Errors
    /// `DivisionByZero` for `/` or `%` by zero, including `-0.0`.
    pub(in crate::interpreter::evaluator) fn eval_float_op(op: InfixOperator,
                                                           a: f64,
                                                           b: f64,
                                                           position: Position)
                                                           -> Result<Value, RuntimeError> {
        if let Some(result) = Self::compare(op, &a, &b) {
            return Ok(Value::Boolean(result));
        }

        let result = match op {
            InfixOperator::Add => a + b,
            InfixOperator::Sub => a - b,
            InfixOperator::Mul => a * b,
            InfixOperator::Div | InfixOperator::Mod if b == 0.0 => {
                return Err(RuntimeError::DivisionByZero { position });
            },
            InfixOperator::Div => a / b,
            InfixOperator::Mod => a % b,
            InfixOperator::Pow => a.powf(b),
            _ => return Ok(Value::Boolean(true)),
        };

        Ok(Value::Float(result))
    }
}
