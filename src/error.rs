/// Parsing errors.
///
/// Defines the syntax errors the parser collects while building the tree:
/// unexpected or missing tokens, malformed literals and illegal characters.
/// Each error carries the position where it was detected and renders as a
/// self-contained message.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unresolved identifiers, type mismatches, wrong argument
/// counts, unsupported operations and arithmetic failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
