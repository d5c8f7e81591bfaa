use std::mem;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token, TokenKind},
        parser::precedence::{Precedence, infix_precedence, infix_rule},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A Pratt parser over a stream of tokens.
///
/// The parser holds a two-token window: `current` is the token being parsed
/// and `peek` is the one after it. Once the underlying iterator is exhausted
/// the window keeps yielding `EOF` tokens, so parse rules never have to deal
/// with a missing token.
///
/// Errors never abort parsing. Each one is recorded, the parser skips to the
/// next statement boundary and continues, so a single pass reports every
/// independent syntax error in source order.
///
/// The parser counts the braces it has moved past, so recovery knows how
/// deeply nested the failure point is and can skip to the boundary of the
/// statement list the error belongs to.
#[derive(Debug)]
pub struct Parser<I> {
    pub(in crate::interpreter::parser) tokens:      I,
    pub(in crate::interpreter::parser) current:     Token,
    pub(in crate::interpreter::parser) peek:        Token,
    pub(in crate::interpreter::parser) errors:      Vec<ParseError>,
    /// `{` tokens up to and including `current` that are not yet closed.
    pub(in crate::interpreter::parser) brace_depth: usize,
    /// `current` is a `}` with no open `{` before it.
    unmatched_brace:                                bool,
}

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Creates a parser and primes the `current`/`peek` window.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{lexer::lex, parser::Parser};
    ///
    /// let mut parser = Parser::new(lex("let x = 1;"));
    /// let program = parser.parse_program();
    ///
    /// assert!(parser.errors().is_empty());
    /// assert_eq!(program.to_string(), "let x = 1;");
    /// ```
    pub fn new(tokens: I) -> Self {
        let eof = Token::new(TokenKind::Eof, "", Position::default());
        let mut parser = Self { tokens,
                                current: eof.clone(),
                                peek: eof,
                                errors: Vec::new(),
                                brace_depth: 0,
                                unmatched_brace: false };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parses statements until the end of input.
    ///
    /// Always returns a program. It contains every statement that parsed
    /// successfully; the syntax errors met along the way are available from
    /// [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => program.statements.push(statement),
                Err(error) => {
                    self.record(error);
                    self.synchronize(0);
                },
            }
            self.next_token();
        }

        tracing::debug!(statements = program.statements.len(),
                        errors = self.errors.len(),
                        "parsed program");
        program
    }

    /// The syntax errors recorded so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser and returns its recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parses an expression whose operators all bind tighter than
    /// `precedence`.
    ///
    /// This is the Pratt loop: it applies the prefix rule of the current
    /// token, then keeps folding infix rules while the next token binds more
    /// tightly than `precedence`. On return `current` is the last token of the
    /// expression.
    ///
    /// # Errors
    /// Returns the first error met inside the expression.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self,
                                                           precedence: Precedence)
                                                           -> ParseResult<Expr> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;

            while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
                let Some(entry) = infix_rule(self.peek.kind) else {
                    break;
                };
                self.next_token();
                left = self.parse_infix(entry, left)?;
            }

            Ok(left)
        })
    }

    /// Shifts the window by one token.
    pub(in crate::interpreter::parser) fn next_token(&mut self) {
        let next = self.tokens
                       .next()
                       .unwrap_or_else(|| Token::new(TokenKind::Eof, "", self.peek.position));
        self.current = mem::replace(&mut self.peek, next);

        self.unmatched_brace = false;
        match self.current.kind {
            TokenKind::LBrace => self.brace_depth += 1,
            TokenKind::RBrace => match self.brace_depth.checked_sub(1) {
                Some(depth) => self.brace_depth = depth,
                None => self.unmatched_brace = true,
            },
            _ => {},
        }
    }

    pub(in crate::interpreter::parser) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(in crate::interpreter::parser) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    pub(in crate::interpreter::parser) const fn peek_precedence(&self) -> Precedence {
        infix_precedence(self.peek.kind)
    }

    pub(in crate::interpreter::parser) fn record(&mut self, error: ParseError) {
        tracing::debug!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Skips the remainder of a broken statement.
    ///
    /// `depth` is the brace depth of the statement list the statement
    /// belongs to: `0` for the program, or the depth of a block's opening
    /// `{`. Tokens nested deeper than that, such as the rest of a half-parsed
    /// hash or function body, are skipped whole. At `depth` the parser stops
    /// on a `;`, or on the token just before `let`, `return`, `}` or the end
    /// of input.
    ///
    /// Returns `true` when the parser is left sitting on a `}` that closes
    /// the statement list, or on an unmatched `}` at the top level. The
    /// caller must not step past it.
    pub(in crate::interpreter::parser) fn synchronize(&mut self, depth: usize) -> bool {
        loop {
            match self.current.kind {
                TokenKind::Eof => return false,
                TokenKind::RBrace if self.unmatched_brace || self.brace_depth < depth => {
                    return true;
                },
                TokenKind::Semicolon if self.brace_depth == depth => return false,
                _ => {},
            }

            if self.brace_depth == depth
               && matches!(self.peek.kind,
                           TokenKind::Let | TokenKind::Return | TokenKind::RBrace | TokenKind::Eof)
            {
                return false;
            }

            self.next_token();
        }
    }
}

/// Parses a token stream into a program and the list of syntax errors.
///
/// # Parameters
/// - `tokens`: Any token stream, normally produced by [`crate::lex`].
///
/// # Returns
/// The program holding every statement that parsed, and the errors in source
/// order. The program is only meaningful to evaluate when the error list is
/// empty.
///
/// # Example
/// ```
/// use jet::{lex, parse};
///
/// let (program, errors) = parse(lex("let = 5; 1 + 2;"));
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(program.to_string(), "(1 + 2)");
/// ```
pub fn parse<T>(tokens: T) -> (Program, Vec<ParseError>)
    where T: IntoIterator<Item = Token>
{
    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.parse_program();
    (program, parser.into_errors())
}
