/// Built-in function table and implementations.
///
/// Contains the primitive operations available to every program: `len`,
/// `first`, `last`, `rest`, `push` and `puts`.
pub mod builtin;

/// Call evaluation for closures and builtins.
pub mod core;
