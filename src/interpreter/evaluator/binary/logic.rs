use crate::{
    ast::{Expr, InfixOperator},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The right operand is only evaluated when the left one does not decide
    /// the result. Both operands are judged by truthiness and the result is
    /// always a boolean.
    ///
    /// # Parameters
    /// - `left`, `right`: The unevaluated operands.
    /// - `op`: `And` or `Or`.
    /// - `env`: The environment to evaluate the operands in.
    pub(in crate::interpreter::evaluator) fn eval_logical(&mut self,
                                                          left: &Expr,
                                                          op: InfixOperator,
                                                          right: &Expr,
                                                          env: &Environment)
                                                          -> EvalResult<Value> {
        let left = self.eval_expression(left, env)?.is_truthy();

        match op {
            InfixOperator::And if !left => Ok(Value::Boolean(false)),
            InfixOperator::Or if left => Ok(Value::Boolean(true)),
            _ => Ok(Value::Boolean(self.eval_expression(right, env)?.is_truthy())),
        }
    }
}
