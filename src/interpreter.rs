/// The environment module stores variable bindings.
///
/// An environment is a chain of scopes. Each scope maps names to values and
/// points to the scope that encloses it. Function values keep a handle to the
/// environment they were created in, which is how closures see the bindings
/// of their defining scope.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree produced by the parser against an
/// environment. Return statements and runtime errors abort the remaining work
/// and bubble up through enclosing blocks until a call boundary or the top
/// level handles them.
///
/// # Responsibilities
/// - Evaluates statements and expressions in source order.
/// - Applies operators with dynamic type checks and numeric promotion.
/// - Calls user functions and builtins, bounding the call depth.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and source
///   position.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Turns unrecognised input into `ILLEGAL` tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a Pratt parser driven by a data table of prefix and infix
/// rules. It never stops at the first syntax error: errors are collected and
/// parsing resumes at the next statement boundary.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Applies operator precedence and associativity from the table.
/// - Reports syntax errors with their source position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares every value a program can produce: integers, floats,
/// booleans, strings, null, functions, builtins, arrays and hashes. It also
/// provides type names for error messages, truthiness and the `inspect`
/// rendering used by the REPL.
pub mod value;
