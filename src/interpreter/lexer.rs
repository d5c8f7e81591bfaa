use std::{fmt, iter::FusedIterator};

use logos::Logos;

/// The raw token classes recognised by the logos automaton.
///
/// Identifiers and keywords share a single class here; keyword classification
/// happens afterwards in [`TokenKind::lookup_ident`], once the whole run of
/// identifier characters has been scanned.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedStr,
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("**")]
    Power,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

/// The kind of a lexical token.
///
/// Every token produced by the [`Lexer`] carries one of these tags together
/// with its literal text and source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character (or unterminated string) that matches no lexical rule.
    Illegal,
    /// End of input. Always the last token of a sequence.
    Eof,
    /// Identifier such as `x` or `new_counter`.
    Ident,
    /// Integer literal such as `42`.
    Int,
    /// Float literal such as `3.14`.
    Float,
    /// String literal; the token literal holds the unescaped contents.
    Str,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `**`
    Power,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `fn`
    Function,
    /// `let`
    Let,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl TokenKind {
    /// Classifies a fully scanned identifier run as a keyword or a plain
    /// identifier.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::lookup_ident("fn"), TokenKind::Function);
    /// assert_eq!(TokenKind::lookup_ident("fnord"), TokenKind::Ident);
    /// ```
    #[must_use]
    pub fn lookup_ident(ident: &str) -> Self {
        match ident {
            "fn" => Self::Function,
            "let" => Self::Let,
            "return" => Self::Return,
            "if" => Self::If,
            "else" => Self::Else,
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            _ => Self::Ident,
        }
    }
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Ident => Self::Ident,
            RawToken::Float => Self::Float,
            RawToken::Int => Self::Int,
            RawToken::Str => Self::Str,
            RawToken::UnterminatedStr | RawToken::Comment => Self::Illegal,
            RawToken::Assign => Self::Assign,
            RawToken::Plus => Self::Plus,
            RawToken::Minus => Self::Minus,
            RawToken::Asterisk => Self::Asterisk,
            RawToken::Power => Self::Power,
            RawToken::Slash => Self::Slash,
            RawToken::Percent => Self::Percent,
            RawToken::Bang => Self::Bang,
            RawToken::Equal => Self::Equal,
            RawToken::NotEqual => Self::NotEqual,
            RawToken::Less => Self::Less,
            RawToken::Greater => Self::Greater,
            RawToken::LessEqual => Self::LessEqual,
            RawToken::GreaterEqual => Self::GreaterEqual,
            RawToken::And => Self::And,
            RawToken::Or => Self::Or,
            RawToken::Comma => Self::Comma,
            RawToken::Semicolon => Self::Semicolon,
            RawToken::Colon => Self::Colon,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
            RawToken::LBracket => Self::LBracket,
            RawToken::RBracket => Self::RBracket,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ident => "IDENT",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Str => "STRING",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Power => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Function => "fn",
            Self::Let => "let",
            Self::Return => "return",
            Self::If => "if",
            Self::Else => "else",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        };
        write!(f, "{text}")
    }
}

/// A location in the source text. Lines and columns are 1-based and columns
/// count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The character column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A lexical token: its kind, literal text and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The classification of the token.
    pub kind:     TokenKind,
    /// The literal text. For strings this is the unescaped contents.
    pub literal:  String,
    /// The position of the first character of the token.
    pub position: Position,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self { kind,
               literal: literal.into(),
               position }
    }
}

/// Converts source text into a lazy sequence of [`Token`]s.
///
/// The lexer walks the input strictly left to right. It never fails: text that
/// matches no rule becomes an [`TokenKind::Illegal`] token, so the parser can
/// report it at the right position. Exactly one [`TokenKind::Eof`] token is
/// yielded at the end, after which the iterator is exhausted.
///
/// # Example
/// ```
/// use jet::interpreter::lexer::{Lexer, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("let x = 5;").map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Ident,
///                 TokenKind::Assign,
///                 TokenKind::Int,
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
/// ```
pub struct Lexer<'src> {
    source:   &'src str,
    inner:    logos::Lexer<'src, RawToken>,
    offset:   usize,
    line:     usize,
    column:   usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { source,
               inner: RawToken::lexer(source),
               offset: 0,
               line: 1,
               column: 1,
               finished: false }
    }

    /// Moves the position cursor forward to the byte `offset` and returns the
    /// position found there.
    fn advance_to(&mut self, offset: usize) -> Position {
        for ch in self.source.get(self.offset..offset).unwrap_or_default().chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
        Position::new(self.line, self.column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let Some(result) = self.inner.next() else {
            self.finished = true;
            let position = self.advance_to(self.source.len());
            return Some(Token::new(TokenKind::Eof, "", position));
        };

        let span = self.inner.span();
        let slice = self.inner.slice();
        let position = self.advance_to(span.start);

        let token = match result {
            Ok(RawToken::Ident) => Token::new(TokenKind::lookup_ident(slice), slice, position),
            Ok(RawToken::Str) => {
                Token::new(TokenKind::Str, unescape(&slice[1..slice.len() - 1]), position)
            },
            Ok(raw) => Token::new(TokenKind::from(raw), slice, position),
            Err(()) => Token::new(TokenKind::Illegal, slice, position),
        };

        tracing::trace!(kind = %token.kind, literal = %token.literal, %position, "token");
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lexes `source` into a lazy token sequence.
///
/// # Example
/// ```
/// use jet::interpreter::lexer::{TokenKind, lex};
///
/// let tokens: Vec<_> = lex("a @ b").collect();
///
/// assert_eq!(tokens[1].kind, TokenKind::Illegal);
/// assert_eq!(tokens[1].literal, "@");
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
/// ```
#[must_use]
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Resolves the escape sequences of a string literal body.
///
/// `\n`, `\t`, `\r`, `\0`, `\"` and `\\` are translated; any other escape is
/// kept as written.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}
