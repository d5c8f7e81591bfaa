use crate::interpreter::lexer::{Position, TokenKind};

/// Represents all errors that can occur during parsing.
///
/// The parser never stops at the first error; it records one of these and
/// resumes at the next statement boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A specific token was required but another one was found.
    #[error("Error on {position}: expected next token to be {expected}, got {found} instead.")]
    ExpectedToken {
        /// The token kind the grammar required.
        expected: TokenKind,
        /// The token kind actually found.
        found:    TokenKind,
        /// Where the unexpected token starts.
        position: Position,
    },
    /// The token cannot start an expression.
    #[error("Error on {position}: no prefix parse rule for {token}.")]
    NoPrefixRule {
        /// The offending token kind.
        token:    TokenKind,
        /// Where the token starts.
        position: Position,
    },
    /// The lexer produced a token for unrecognised input.
    #[error("Error on {position}: illegal token '{literal}'.")]
    IllegalToken {
        /// The unrecognised source text.
        literal:  String,
        /// Where the text starts.
        position: Position,
    },
    /// An integer literal does not fit in a 64-bit signed integer.
    #[error("Error on {position}: could not parse {literal} as integer.")]
    InvalidInteger {
        /// The literal text.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
    /// A float literal could not be converted.
    #[error("Error on {position}: could not parse {literal} as float.")]
    InvalidFloat {
        /// The literal text.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
    /// A function literal names the same parameter twice.
    #[error("Error on {position}: duplicate parameter '{name}'.")]
    DuplicateParameter {
        /// The repeated parameter name.
        name:     String,
        /// Where the repeated name appears.
        position: Position,
    },
}

impl ParseError {
    /// Returns the position at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::ExpectedToken { position, .. }
            | Self::NoPrefixRule { position, .. }
            | Self::IllegalToken { position, .. }
            | Self::InvalidInteger { position, .. }
            | Self::InvalidFloat { position, .. }
            | Self::DuplicateParameter { position, .. } => *position,
        }
    }
}
