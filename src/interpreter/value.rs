/// Hash key representation.
///
/// Defines the `HashKey` type used for the keys of a `Value::Hash`. Only
/// scalar values can be keys; floats are wrapped so that keys have a total
/// order and hash maps iterate deterministically.
pub mod hash_key;
/// Function values.
///
/// Defines `Function`, the closure produced by evaluating a function literal:
/// the shared literal plus the environment captured where it was evaluated.
pub mod function;

pub mod core;
