/// Parser state, token cursor, error collection and the program entry point.
pub mod core;
/// Data-driven Pratt table.
///
/// Maps every token kind to its prefix rule, infix rule, binding precedence
/// and associativity. The table is independent of the recursive driver so it
/// can be inspected and tested on its own.
pub mod precedence;
/// Statement parsing: `let`, reassignment, `return`, blocks and expression
/// statements, plus statement-boundary error recovery.
pub mod statement;
/// Prefix parse rules: literals, identifiers, prefix operators, grouping,
/// `if`, function literals, arrays and hashes.
pub mod expression;
/// Infix parse rules: binary operators, calls and index expressions.
pub mod infix;
/// Shared helpers for delimited lists and expected tokens.
pub mod utils;

pub use self::core::{Parser, parse};
