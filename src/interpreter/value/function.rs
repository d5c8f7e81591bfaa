use std::{fmt, rc::Rc};

use crate::{
    ast::{Block, FunctionLiteral},
    interpreter::environment::Environment,
};

/// A closure: a function literal paired with the environment it was
/// evaluated in.
///
/// Calls bind parameters in a fresh scope enclosed by `env`, so the body sees
/// the live bindings of the defining scope, including writes made to them
/// after the function was created.
#[derive(Clone)]
pub struct Function {
    /// The literal this closure was created from.
    pub literal: Rc<FunctionLiteral>,
    /// The captured defining environment.
    pub env:     Environment,
}

impl Function {
    #[must_use]
    pub fn new(literal: Rc<FunctionLiteral>, env: Environment) -> Self {
        Self { literal, env }
    }

    /// The parameter names, in order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.literal.parameters
    }

    #[must_use]
    pub fn body(&self) -> &Block {
        &self.literal.body
    }
}

/// Functions compare by identity: two values are equal only if they share
/// both the literal and the captured scope.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.literal, &other.literal) && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("parameters", &self.literal.parameters)
         .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}
