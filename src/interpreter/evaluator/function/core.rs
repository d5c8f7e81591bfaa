use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Evaluator, Signal},
            function::builtin::{Arity, BuiltinDef},
            utils::check_arity,
        },
        lexer::Position,
        value::{core::Value, function::Function},
    },
};

impl Evaluator {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments left to right, all
    /// in the caller's environment.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       function: &Expr,
                                                       arguments: &[Expr],
                                                       env: &Environment,
                                                       position: Position)
                                                       -> EvalResult<Value> {
        let callee = self.eval_expression(function, env)?;
        let arguments = self.eval_expressions(arguments, env)?;
        self.apply_function(&callee, arguments, position)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// # Parameters
    /// - `callee`: A closure or a builtin.
    /// - `arguments`: The argument values, in order.
    /// - `position`: Position of the call for error reporting.
    ///
    /// # Returns
    /// The call's result. A `return` inside the body is unwrapped here and
    /// does not propagate further.
    ///
    /// # Errors
    /// - `NotCallable` if `callee` is not a function.
    /// - `ArgumentCountMismatch` if the arity does not match.
    /// - `CallDepthExceeded` if the call would exceed the depth limit.
    /// - Any error raised by the body.
    pub fn apply_function(&mut self,
                          callee: &Value,
                          arguments: Vec<Value>,
                          position: Position)
                          -> EvalResult<Value> {
        match callee {
            Value::Function(function) => self.call_function(function, arguments, position),
            Value::Builtin(def) => Ok(self.call_builtin(def, &arguments, position)?),
            other => Err(RuntimeError::NotCallable { type_name: other.type_name(),
                                                     position }.into()),
        }
    }

    /// Runs a closure body in a fresh scope enclosed by the captured
    /// environment, with the parameters bound positionally.
    fn call_function(&mut self,
                     function: &Function,
                     arguments: Vec<Value>,
                     position: Position)
                     -> EvalResult<Value> {
        check_arity(function.parameters().len(), arguments.len(), position)?;

        if self.depth >= self.max_depth {
            return Err(RuntimeError::CallDepthExceeded { limit: self.max_depth,
                                                         position }.into());
        }

        if self.scopes.should_collect() {
            self.collect_scopes();
        }

        let scope = Environment::enclosed(&function.env);
        self.scopes.track(&scope);
        for (name, value) in function.parameters().iter().zip(arguments) {
            scope.define(name.as_str(), value);
        }

        tracing::debug!(depth = self.depth,
                        parameters = ?function.parameters(),
                        %position,
                        "call");

        self.depth += 1;
        let result = self.eval_statements(&function.body().statements, &scope);
        self.depth -= 1;

        match result {
            Ok(value) => Ok(value.unwrap_or(Value::Null)),
            Err(Signal::Return(value)) => Ok(value),
            Err(error) => Err(error),
        }
    }

    fn call_builtin(&mut self,
                    def: &BuiltinDef,
                    arguments: &[Value],
                    position: Position)
                    -> Result<Value, RuntimeError> {
        if let Arity::Exact(expected) = def.arity {
            check_arity(expected, arguments.len(), position)?;
        }

        tracing::debug!(builtin = def.name, %position, "call");
        (def.func)(self, arguments, position)
    }
}
