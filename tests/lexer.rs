use jet::{
    interpreter::lexer::{Position, Token, TokenKind},
    lex,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).map(|token| token.kind).collect()
}

#[test]
fn lexes_a_let_statement_with_positions() {
    let tokens: Vec<Token> = lex("let five = 5;\nfive").collect();

    assert_eq!(tokens,
               vec![Token::new(TokenKind::Let, "let", Position::new(1, 1)),
                    Token::new(TokenKind::Ident, "five", Position::new(1, 5)),
                    Token::new(TokenKind::Assign, "=", Position::new(1, 10)),
                    Token::new(TokenKind::Int, "5", Position::new(1, 12)),
                    Token::new(TokenKind::Semicolon, ";", Position::new(1, 13)),
                    Token::new(TokenKind::Ident, "five", Position::new(2, 1)),
                    Token::new(TokenKind::Eof, "", Position::new(2, 5)),]);
}

#[test]
fn two_character_operators_use_longest_match() {
    use TokenKind::{
        And, Assign, Asterisk, Bang, Eof, Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual,
        Or, Power,
    };

    assert_eq!(kinds("= == ! != < <= > >= * ** && ||"),
               vec![Assign, Equal, Bang, NotEqual, Less, LessEqual, Greater, GreaterEqual,
                    Asterisk, Power, And, Or, Eof]);
    assert_eq!(kinds("a==b"),
               vec![TokenKind::Ident, Equal, TokenKind::Ident, Eof]);
}

#[test]
fn keywords_are_matched_on_the_whole_identifier() {
    use TokenKind::{Else, Eof, False, Function, Ident, If, Let, Null, Return, True};

    assert_eq!(kinds("fn let return if else true false null"),
               vec![Function, Let, Return, If, Else, True, False, Null, Eof]);
    assert_eq!(kinds("fnord letter returns iffy nullable _if"),
               vec![Ident, Ident, Ident, Ident, Ident, Ident, Eof]);
}

#[test]
fn numbers() {
    let tokens: Vec<Token> = lex("42 3.25 7.").collect();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].literal, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].literal, "3.25");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].literal, ".");
}

#[test]
fn strings_are_unescaped() {
    let tokens: Vec<Token> = lex(r#""a\tb\n\"q\" \\ \x""#).collect();

    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].literal, "a\tb\n\"q\" \\ \\x");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn unterminated_string_is_illegal() {
    let tokens: Vec<Token> = lex(r#"let s = "abc"#).collect();

    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].literal, "\"abc");
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn unknown_characters_are_illegal_and_lexing_continues() {
    let tokens: Vec<Token> = lex("a @ b").collect();

    assert_eq!(tokens[1], Token::new(TokenKind::Illegal, "@", Position::new(1, 3)));
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    assert_eq!(kinds("// nothing here\n\t 1 // one\r\n"),
               vec![TokenKind::Int, TokenKind::Eof]);
}

#[test]
fn columns_count_characters() {
    let tokens: Vec<Token> = lex("\"é\" x").collect();

    assert_eq!(tokens[1].position, Position::new(1, 5));
}

#[test]
fn empty_input_yields_only_eof() {
    let tokens: Vec<Token> = lex("").collect();

    assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", Position::new(1, 1))]);
}

#[test]
fn iterator_is_fused_after_eof() {
    let mut lexer = lex("x");

    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Ident));
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

proptest! {
    #[test]
    fn lexing_is_total(source in any::<String>()) {
        let tokens: Vec<Token> = lex(&source).collect();

        prop_assert!(!tokens.is_empty());
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn positions_never_go_backwards(source in "[a-z0-9 +*/();{}\n\"=<>!-]{0,64}") {
        let positions: Vec<Position> = lex(&source).map(|t| t.position).collect();

        for pair in positions.windows(2) {
            prop_assert!((pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column));
        }
    }
}
