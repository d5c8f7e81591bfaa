use crate::{
    ast::Expr,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parser},
            precedence::{InfixEntry, InfixRule, Precedence},
        },
    },
};

impl<I> Parser<I> where I: Iterator<Item = Token>
{
    /// Applies an infix rule with `left` as the already parsed left operand.
    /// `current` is the infix token.
    pub(in crate::interpreter::parser) fn parse_infix(&mut self,
                                                      entry: InfixEntry,
                                                      left: Expr)
                                                      -> ParseResult<Expr> {
        let position = self.current.position;

        match entry.rule {
            InfixRule::Operator(op) => {
                self.next_token();
                let right = self.parse_expression(entry.operand_precedence())?;

                Ok(Expr::Infix { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 position })
            },
            InfixRule::Call => {
                let arguments = self.parse_expression_list(TokenKind::RParen)?;

                Ok(Expr::Call { function: Box::new(left),
                                arguments,
                                position })
            },
            InfixRule::Index => {
                self.next_token();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::RBracket)?;

                Ok(Expr::Index { left: Box::new(left),
                                 index: Box::new(index),
                                 position })
            },
        }
    }
}
