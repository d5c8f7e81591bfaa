//! # jet
//!
//! jet is a small, dynamically typed, expression-oriented scripting language
//! with first-class functions and closures. The crate contains the whole
//! pipeline: a lexer, a Pratt parser, a tree-walking evaluator and a REPL
//! driver.
//!
//! The core is reachable through three functions, [`lex`], [`parse`] and
//! [`eval`], plus the [`run`] convenience that chains them on a fresh
//! environment.
//!
//! ```
//! use jet::{interpreter::value::core::Value, run};
//!
//! let source = "
//!     let adder = fn(x) { fn(y) { x + y } };
//!     let add_two = adder(2);
//!     add_two(40)
//! ";
//!
//! assert_eq!(run(source), Ok(Value::Integer(42)));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{ParseError, RuntimeError},
    interpreter::{environment::Environment, evaluator::core::Evaluator, value::core::Value},
};
pub use crate::interpreter::{lexer::lex, parser::parse};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to the nodes that can fail at runtime.
/// - Renders a canonical, fully parenthesised form for echoing.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating code. Every error carries the source position it refers to and
/// renders as a self-contained message.
///
/// # Responsibilities
/// - Defines error enums for the parser and the evaluator.
/// - Attaches line and column numbers for context.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, environments, values and
/// evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive driver.
///
/// A `Session` keeps one environment alive across inputs; `start` runs the
/// read-eval-print loop over any reader and writer.
pub mod repl;
/// General utilities for safe numeric conversion and stack growth.
///
/// This module provides reusable helpers used throughout the parser and
/// evaluator.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Grow the native stack on deep recursion.
pub mod util;

/// Any failure of [`run`]: the syntax errors of the input, or the runtime
/// error that stopped it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input had syntax errors and was not evaluated.
    #[error("parser errors:{}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),
    /// Evaluation stopped on a runtime error.
    #[error("ERROR: {0}")]
    Runtime(#[from] RuntimeError),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors.iter().map(|error| format!("\n\t{error}")).collect()
}

/// Evaluates a program against an environment.
///
/// Bindings made by the program are left in `env`. Output written by `puts`
/// is discarded; use a [`repl::Session`] to collect it.
///
/// # Returns
/// The value of the last expression statement, the value of a top-level
/// `return`, or `null` if the program evaluated neither.
///
/// # Errors
/// The first runtime error raised.
///
/// # Example
/// ```
/// use jet::{eval, interpreter::{environment::Environment, value::core::Value}, lex, parse};
///
/// let env = Environment::new();
/// let (program, errors) = parse(lex("let x = 1; let f = fn() { let x = 2; x }; f(); x"));
///
/// assert!(errors.is_empty());
/// assert_eq!(eval(&program, &env), Ok(Value::Integer(1)));
/// ```
pub fn eval(program: &Program, env: &Environment) -> Result<Value, RuntimeError> {
    Evaluator::new().eval_program(program, env)
                    .map(|value| value.unwrap_or(Value::Null))
}

/// Lexes, parses and evaluates `source` in a fresh environment.
///
/// # Errors
/// - `Error::Parse` with every syntax error if the source does not parse.
/// - `Error::Runtime` if evaluation fails.
///
/// # Examples
/// ```
/// use jet::{Error, interpreter::value::core::Value, run};
///
/// assert_eq!(run("1 + 2 * 3"), Ok(Value::Integer(7)));
///
/// // Unknown identifiers are runtime errors.
/// assert!(matches!(run("foobar"), Err(Error::Runtime(_))));
///
/// // Syntax errors prevent evaluation altogether.
/// assert!(matches!(run("let = 1;"), Err(Error::Parse(_))));
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    let (program, errors) = parse(lex(source));
    if !errors.is_empty() {
        return Err(Error::Parse(errors));
    }

    Ok(eval(&program, &Environment::new())?)
}
