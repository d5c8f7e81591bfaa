use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        lexer::Position,
        value::core::Value,
    },
};

/// Checks that a call received exactly the expected number of arguments.
///
/// # Errors
/// `ArgumentCountMismatch` naming both counts.
///
/// # Example
/// ```
/// use jet::interpreter::{evaluator::utils::check_arity, lexer::Position};
///
/// assert!(check_arity(2, 2, Position::default()).is_ok());
/// assert!(check_arity(2, 3, Position::default()).is_err());
/// ```
pub fn check_arity(expected: usize, found: usize, position: Position) -> Result<(), RuntimeError> {
    if expected == found {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { expected,
                                                  found,
                                                  position })
    }
}

impl Evaluator {
    /// Evaluates expressions left to right, stopping at the first signal.
    pub(in crate::interpreter::evaluator) fn eval_expressions(&mut self,
                                                              exprs: &[Expr],
                                                              env: &Environment)
                                                              -> EvalResult<Vec<Value>> {
        exprs.iter()
             .map(|expr| self.eval_expression(expr, env))
             .collect()
    }
}
