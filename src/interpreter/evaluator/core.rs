use std::rc::Rc;

use crate::{
    ast::{Block, Expr, FunctionLiteral, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, collector::ScopeCollector},
        evaluator::function::builtin::lookup_builtin,
        lexer::Position,
        value::{core::Value, function::Function},
    },
    util::stack::ensure_sufficient_stack,
};

/// Default limit on the number of active function calls.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// A control signal that aborts the statements remaining in the current
/// block and bubbles up to whoever handles it.
///
/// `Return` is handled by the nearest enclosing function call, or by the top
/// level. `Error` is only handled by the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A `return` statement carrying its value.
    Return(Value),
    /// A runtime error.
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the evaluator.
///
/// The `Err` side carries a [`Signal`], so `?` implements the
/// abort-and-bubble discipline for both returns and errors.
pub type EvalResult<T> = Result<T, Signal>;

/// Stores the evaluator state that is not part of the environment.
///
/// ## Usage
///
/// An `Evaluator` is created once per session and reused across inputs. It
/// holds the text written by `puts` until the driver drains it, the call
/// depth bookkeeping, and the collector for the scopes it creates.
#[derive(Debug)]
pub struct Evaluator {
    /// Lines written by `puts` since the last [`Evaluator::take_output`].
    pub(in crate::interpreter::evaluator) output:    Vec<String>,
    /// Active function calls.
    pub(in crate::interpreter::evaluator) depth:     usize,
    /// Maximum number of active function calls.
    pub(in crate::interpreter::evaluator) max_depth: usize,
    /// Call and block scopes created so far.
    pub(in crate::interpreter::evaluator) scopes:    ScopeCollector,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the default call depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates an evaluator that allows at most `max_depth` active calls.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { output: Vec::new(),
               depth: 0,
               max_depth,
               scopes: ScopeCollector::new() }
    }

    /// The call depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The number of call and block scopes still alive, including those kept
    /// by closures that outlived their call.
    #[must_use]
    pub fn live_scopes(&self) -> usize {
        self.scopes.live()
    }

    /// Frees the scopes this evaluator created that only reference cycles
    /// keep alive, such as a call scope holding a closure that captured it.
    pub(in crate::interpreter::evaluator) fn collect_scopes(&mut self) {
        let released = self.scopes.collect();
        tracing::debug!(released, live = self.scopes.live(), "collected scopes");
    }

    /// Removes and returns everything written by `puts` so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Evaluates a program statement by statement.
    ///
    /// A top-level `return` stops the program and yields its value. A runtime
    /// error stops the program; statements evaluated before it keep their
    /// effects on `env`. Scopes left unreachable by the program are
    /// collected before returning.
    ///
    /// # Returns
    /// - `Ok(Some(value))`: the value of the last expression statement, or of
    ///   a top-level `return`.
    /// - `Ok(None)`: the program evaluated no expression statement, e.g. it
    ///   only contained `let` statements.
    ///
    /// # Errors
    /// The first runtime error raised.
    ///
    /// # Example
    /// ```
    /// use jet::{
    ///     interpreter::{environment::Environment, evaluator::core::Evaluator, value::core::Value},
    ///     lex, parse,
    /// };
    ///
    /// let env = Environment::new();
    /// let mut evaluator = Evaluator::new();
    ///
    /// let (program, _) = parse(lex("let x = 40;"));
    /// assert_eq!(evaluator.eval_program(&program, &env), Ok(None));
    ///
    /// let (program, _) = parse(lex("x + 2"));
    /// assert_eq!(evaluator.eval_program(&program, &env), Ok(Some(Value::Integer(42))));
    /// ```
    pub fn eval_program(&mut self,
                        program: &Program,
                        env: &Environment)
                        -> Result<Option<Value>, RuntimeError> {
        self.depth = 0;

        let result = self.eval_statements(&program.statements, env);
        self.collect_scopes();

        match result {
            Ok(value) => Ok(value),
            Err(Signal::Return(value)) => Ok(Some(value)),
            Err(Signal::Error(error)) => {
                tracing::debug!(%error, "evaluation failed");
                Err(error)
            },
        }
    }

    /// Evaluates statements in order, stopping at the first signal.
    pub(in crate::interpreter::evaluator) fn eval_statements(&mut self,
                                                             statements: &[Statement],
                                                             env: &Environment)
                                                             -> EvalResult<Option<Value>> {
        let mut result = None;
        for statement in statements {
            if let Some(value) = self.eval_statement(statement, env)? {
                result = Some(value);
            }
        }
        Ok(result)
    }

    /// Evaluates a single statement.
    ///
    /// # Returns
    /// `Some(value)` for expression statements and blocks that produced a
    /// value, `None` for bindings.
    pub fn eval_statement(&mut self,
                          statement: &Statement,
                          env: &Environment)
                          -> EvalResult<Option<Value>> {
        tracing::trace!(%statement, "eval statement");

        match statement {
            Statement::Let { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                env.define(name.as_str(), value);
                Ok(None)
            },
            Statement::Assign { name,
                                value,
                                position, } => {
                let value = self.eval_expression(value, env)?;
                if env.assign(name, value) {
                    Ok(None)
                } else {
                    Err(RuntimeError::AssignToUndefined { name:     name.clone(),
                                                          position: *position, }.into())
                }
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Null,
                };
                Err(Signal::Return(value))
            },
            Statement::Expression { expr, .. } => Ok(Some(self.eval_expression(expr, env)?)),
            Statement::Block(block) => self.eval_scoped(block, env),
        }
    }

    /// Evaluates a block in a new scope enclosed by `env`.
    fn eval_scoped(&mut self, block: &Block, env: &Environment) -> EvalResult<Option<Value>> {
        let scope = Environment::enclosed(env);
        self.scopes.track(&scope);
        self.eval_statements(&block.statements, &scope)
    }

    /// Evaluates a block used as an expression, such as an `if` branch.
    ///
    /// # Returns
    /// The value of the last expression statement, or `null` if there is
    /// none.
    pub fn eval_block(&mut self, block: &Block, env: &Environment) -> EvalResult<Value> {
        Ok(self.eval_scoped(block, env)?.unwrap_or(Value::Null))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. It dispatches
    /// on the expression variant; operators, calls and collections are
    /// handled in their own modules.
    pub fn eval_expression(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::Identifier { name, position } => Ok(Self::eval_identifier(name, *position, env)?),
            Expr::Integer(i) => Ok(Value::Integer(*i)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Null => Ok(Value::Null),
            Expr::Prefix { op, right, position } => {
                let right = self.eval_expression(right, env)?;
                Ok(Self::eval_prefix(*op, &right, *position)?)
            },
            Expr::Infix { left,
                          op,
                          right,
                          position, } => self.eval_infix(left, *op, right, env, *position),
            Expr::If { condition,
                       consequence,
                       alternative, } => {
                self.eval_if(condition, consequence, alternative.as_ref(), env)
            },
            Expr::Function(literal) => Ok(Self::eval_function_literal(literal, env)),
            Expr::Call { function,
                         arguments,
                         position, } => self.eval_call(function, arguments, env, *position),
            Expr::Array(elements) => self.eval_array(elements, env),
            Expr::Index { left,
                          index,
                          position, } => self.eval_index(left, index, env, *position),
            Expr::Hash { pairs, position } => self.eval_hash(pairs, env, *position),
        })
    }

    /// Resolves an identifier through the environment chain, then among the
    /// builtins. User bindings therefore shadow builtins.
    ///
    /// # Errors
    /// `UnknownIdentifier` if the name is bound nowhere.
    fn eval_identifier(name: &str,
                       position: Position,
                       env: &Environment)
                       -> Result<Value, RuntimeError> {
        env.get(name)
           .or_else(|| lookup_builtin(name).map(Value::Builtin))
           .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                            position })
    }

    fn eval_if(&mut self,
               condition: &Expr,
               consequence: &Block,
               alternative: Option<&Block>,
               env: &Environment)
               -> EvalResult<Value> {
        if self.eval_expression(condition, env)?.is_truthy() {
            self.eval_block(consequence, env)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative, env)
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_function_literal(literal: &Rc<FunctionLiteral>, env: &Environment) -> Value {
        Value::Function(Function::new(Rc::clone(literal), env.clone()))
    }
}
