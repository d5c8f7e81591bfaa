use std::collections::HashSet;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            precedence::Precedence,
        },
    },
};

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Advances onto the next token if it has the expected kind.
    ///
    /// # Errors
    /// - `IllegalToken` if the next token is one the lexer could not
    ///   recognise.
    /// - `ExpectedToken` naming the expected and the actual kind otherwise.
    pub(in crate::interpreter::parser) fn expect_peek(&mut self,
                                                      expected: TokenKind)
                                                      -> ParseResult<()> {
        if self.peek_is(expected) {
            self.next_token();
            return Ok(());
        }

        if self.peek_is(TokenKind::Illegal) {
            return Err(ParseError::IllegalToken { literal:  self.peek.literal.clone(),
                                                  position: self.peek.position, });
        }

        Err(ParseError::ExpectedToken { expected,
                                        found: self.peek.kind,
                                        position: self.peek.position })
    }

    /// Parses a comma-separated list of expressions up to `closing`.
    ///
    /// Shared by array literals and call arguments. `current` is the opening
    /// delimiter; on return it is `closing`. An immediately following
    /// `closing` produces an empty list.
    ///
    /// Grammar: `list := (expression ("," expression)*)? closing`
    ///
    /// # Errors
    /// Propagates element errors, and returns `ExpectedToken` if the list is
    /// not closed by `closing`.
    pub(in crate::interpreter::parser) fn parse_expression_list(
        &mut self,
        closing: TokenKind)
        -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();

        if self.peek_is(closing) {
            self.next_token();
            return Ok(items);
        }

        self.next_token();
        items.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(closing)?;
        Ok(items)
    }

    /// Parses a function literal's parameter list. `current` is the `(`; on
    /// return it is the `)`.
    ///
    /// # Errors
    /// - `ExpectedToken` if a parameter is not an identifier or the list is
    ///   not closed.
    /// - `DuplicateParameter` if a name appears twice.
    pub(in crate::interpreter::parser) fn parse_parameters(&mut self) -> ParseResult<Vec<String>> {
        let mut parameters = Vec::new();
        let mut seen = HashSet::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        loop {
            self.expect_peek(TokenKind::Ident)?;

            let name = self.current.literal.clone();
            if !seen.insert(name.clone()) {
                return Err(ParseError::DuplicateParameter { name,
                                                            position: self.current.position });
            }
            parameters.push(name);

            if !self.peek_is(TokenKind::Comma) {
                break;
            }
            self.next_token();
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }
}
