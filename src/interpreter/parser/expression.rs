use std::rc::Rc;

use crate::{
    ast::{Block, Expr, FunctionLiteral, PrefixOperator, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            precedence::{Precedence, PrefixRule, prefix_rule},
        },
    },
};

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Applies the prefix rule of the current token.
    ///
    /// # Errors
    /// - `IllegalToken` if the lexer could not recognise the current token.
    /// - `NoPrefixRule` if the token cannot start an expression.
    pub(in crate::interpreter::parser) fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let Some(rule) = prefix_rule(self.current.kind) else {
            return Err(self.no_prefix_error());
        };

        match rule {
            PrefixRule::Identifier => Ok(Expr::Identifier { name:     self.current.literal.clone(),
                                                            position: self.current.position, }),
            PrefixRule::Integer => self.parse_integer(),
            PrefixRule::Float => self.parse_float(),
            PrefixRule::Str => Ok(Expr::Str(self.current.literal.clone())),
            PrefixRule::Boolean => Ok(Expr::Boolean(self.current_is(TokenKind::True))),
            PrefixRule::Null => Ok(Expr::Null),
            PrefixRule::Operator => self.parse_prefix_operator(),
            PrefixRule::Grouped => self.parse_grouped(),
            PrefixRule::If => self.parse_if(),
            PrefixRule::Function => self.parse_function_literal(),
            PrefixRule::Array => Ok(Expr::Array(self.parse_expression_list(TokenKind::RBracket)?)),
            PrefixRule::Hash => self.parse_hash(),
        }
    }

    fn no_prefix_error(&self) -> ParseError {
        if self.current_is(TokenKind::Illegal) {
            ParseError::IllegalToken { literal:  self.current.literal.clone(),
                                       position: self.current.position, }
        } else {
            ParseError::NoPrefixRule { token:    self.current.kind,
                                       position: self.current.position, }
        }
    }

    fn parse_integer(&self) -> ParseResult<Expr> {
        self.current
            .literal
            .parse::<i64>()
            .map(Expr::Integer)
            .map_err(|_| ParseError::InvalidInteger { literal:  self.current.literal.clone(),
                                                      position: self.current.position, })
    }

    fn parse_float(&self) -> ParseResult<Expr> {
        self.current
            .literal
            .parse::<f64>()
            .map(Expr::Float)
            .map_err(|_| ParseError::InvalidFloat { literal:  self.current.literal.clone(),
                                                    position: self.current.position, })
    }

    /// Parses `-<expr>` or `!<expr>`. The operand takes in `**` but nothing
    /// looser, so `-a * b` is `(-a) * b` while `-a ** b` is `-(a ** b)`.
    fn parse_prefix_operator(&mut self) -> ParseResult<Expr> {
        let position = self.current.position;
        let op = if self.current_is(TokenKind::Minus) {
            PrefixOperator::Negate
        } else {
            PrefixOperator::Not
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Power.lower())?;

        Ok(Expr::Prefix { op,
                          right: Box::new(right),
                          position })
    }

    fn parse_grouped(&mut self) -> ParseResult<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    /// Parses `if <cond> { ... } [else { ... } | else if ...]`.
    ///
    /// An `else if` chain is stored as an alternative block holding a single
    /// nested `if` expression.
    fn parse_if(&mut self) -> ParseResult<Expr> {
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();

            if self.peek_is(TokenKind::If) {
                self.next_token();
                let position = self.current.position;
                let nested = self.parse_if()?;
                Some(Block { statements: vec![Statement::Expression { expr: nested,
                                                                      position }], })
            } else {
                self.expect_peek(TokenKind::LBrace)?;
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Expr::If { condition: Box::new(condition),
                      consequence,
                      alternative })
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expr> {
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expr::Function(Rc::new(FunctionLiteral { parameters, body })))
    }

    /// Parses `{ <expr>: <expr>, ... }`. Keys are arbitrary expressions;
    /// whether they are usable as keys is decided at runtime.
    fn parse_hash(&mut self) -> ParseResult<Expr> {
        let position = self.current.position;
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RBrace)?;

        Ok(Expr::Hash { pairs, position })
    }
}
