/// Operand evaluation and dispatch on operand types.
pub mod core;
/// Integer and float arithmetic.
pub mod scalar;
/// Exponentiation.
pub mod power;
/// Ordering and equality.
pub mod comparison;
/// Short-circuit `&&` and `||`.
pub mod logic;
/// String concatenation and comparison.
pub mod string;
