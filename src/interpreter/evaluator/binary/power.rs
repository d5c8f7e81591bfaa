use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
    util::num::promote_integer,
};

impl Evaluator {
    /// Raises an integer to an integer power.
    ///
    /// A non-negative exponent gives an exact integer result. A negative
    /// exponent gives a fractional result, so both operands are promoted and
    /// the result is a float.
    ///
    /// # Errors
    /// - `Overflow` if the integer result does not fit in an `i64`.
    /// - `PrecisionLoss` if promotion of either operand is inexact.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value};
    ///
    /// let at = Position::default();
    ///
    /// assert_eq!(Evaluator::eval_integer_pow(2, 10, at), Ok(Value::Integer(1024)));
    /// assert_eq!(Evaluator::eval_integer_pow(2, -1, at), Ok(Value::Float(0.5)));
    /// assert!(Evaluator::eval_integer_pow(2, 64, at).is_err());
    /// ```
    pub fn eval_integer_pow(base: i64,
                            exponent: i64,
                            position: Position)
                            -> Result<Value, RuntimeError> {
        if exponent < 0 {
            let base = promote_integer(base, position)?;
            let exponent = promote_integer(exponent, position)?;
            return Ok(Value::Float(base.powf(exponent)));
        }

        u32::try_from(exponent).ok()
                               .and_then(|exponent| base.checked_pow(exponent))
                               .map(Value::Integer)
                               .ok_or(RuntimeError::Overflow { position })
    }
}
