use crate::{
    ast::InfixOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, lexer::Position, value::core::Value},
};

impl Evaluator {
    /// Evaluates an operator on two strings.
    ///
    /// `+` concatenates; the comparison operators compare lexicographically
    /// by byte value.
    ///
    /// # Errors
    /// `UnknownInfixOperator` for arithmetic other than `+`.
    pub(in crate::interpreter::evaluator) fn eval_string_op(op: InfixOperator,
                                                            a: &str,
                                                            b: &str,
                                                            position: Position)
                                                            -> Result<Value, RuntimeError> {
        if let Some(result) = Self::compare(op, a, b) {
            return Ok(Value::Boolean(result));
        }

        match op {
            InfixOperator::Add => Ok(Value::Str(format!("{a}{b}"))),
            InfixOperator::And | InfixOperator::Or => Ok(Value::Boolean(true)),
            _ => Err(RuntimeError::UnknownInfixOperator { left: "STRING",
                                                          op,
                                                          right: "STRING",
                                                          position }),
        }
    }
}
