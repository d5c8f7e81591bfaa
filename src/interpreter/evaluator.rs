/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: integer and
/// float arithmetic, string operations, comparisons and the short-circuit
/// logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Core evaluation logic and evaluator state.
///
/// Contains the statement and block walkers, expression dispatch, the
/// `Signal` carrier for returns and errors, and the call depth bookkeeping.
pub mod core;

/// Collection literals and indexing.
///
/// Builds arrays and hashes and evaluates `collection[index]` for arrays,
/// hashes and strings.
pub mod index;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
