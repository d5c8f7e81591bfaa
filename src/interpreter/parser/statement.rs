use crate::{
    ast::{Block, Statement},
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
    /// Parses one statement starting at the current token.
    ///
    /// A `{` at the start of a statement always opens a block statement; a
    /// hash literal in statement position has to be parenthesised.
    ///
    /// On success `current` is the last token of the statement, including its
    /// optional trailing `;`.
    pub(in crate::interpreter::parser) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::LBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Ident if self.peek_is(TokenKind::Assign) => self.parse_assign_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses `let <ident> = <expression> [;]`.
    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let position = self.current.position;

        self.expect_peek(TokenKind::Ident)?;
        let name = self.current.literal.clone();
        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Let { name,
                            value,
                            position })
    }

    /// Parses `<ident> = <expression> [;]`.
    fn parse_assign_statement(&mut self) -> ParseResult<Statement> {
        let position = self.current.position;
        let name = self.current.literal.clone();

        self.next_token();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Assign { name,
                               value,
                               position })
    }

    /// Parses `return [<expression>] [;]`.
    ///
    /// A bare `return` directly followed by `;`, `}` or the end of input
    /// returns `null`.
    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let position = self.current.position;

        if matches!(self.peek.kind,
                    TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof)
        {
            self.skip_semicolon();
            return Ok(Statement::Return { value: None,
                                          position });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Return { value: Some(value),
                               position })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let position = self.current.position;
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Expression { expr, position })
    }

    /// Parses a brace-delimited block. `current` must be the opening `{`; on
    /// return it is the closing `}`.
    ///
    /// Statement errors inside the block are recorded and recovered from
    /// locally, so one bad statement does not swallow the rest of the block.
    ///
    /// # Errors
    /// Returns `ExpectedToken` if the input ends before the closing `}`.
    pub(in crate::interpreter::parser) fn parse_block(&mut self) -> ParseResult<Block> {
        let mut block = Block::default();
        let depth = self.brace_depth;
        self.next_token();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                return Err(ParseError::ExpectedToken { expected: TokenKind::RBrace,
                                                       found:    TokenKind::Eof,
                                                       position: self.current.position, });
            }

            match self.parse_statement() {
                Ok(statement) => block.statements.push(statement),
                Err(error) => {
                    self.record(error);
                    if self.synchronize(depth) {
                        continue;
                    }
                },
            }
            self.next_token();
        }

        Ok(block)
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }
}
