use jet::{
    ast::{Expr, InfixOperator, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Position, TokenKind},
        parser::precedence::{
            Associativity, InfixRule, Precedence, PrefixRule, infix_precedence, infix_rule,
            prefix_rule,
        },
    },
    lex, parse,
};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> String {
    let (program, errors) = parse(lex(source));
    assert!(errors.is_empty(), "unexpected errors for {source:?}: {errors:#?}");
    program.to_string()
}

fn parse_errors(source: &str) -> Vec<String> {
    let (_, errors) = parse(lex(source));
    errors.iter().map(ToString::to_string).collect()
}

#[test]
fn operator_precedence_rendering() {
    let cases = [("-a * b", "((-a) * b)"),
                 ("!-a", "(!(-a))"),
                 ("a + b + c", "((a + b) + c)"),
                 ("a + b - c", "((a + b) - c)"),
                 ("a * b / c % d", "(((a * b) / c) % d)"),
                 ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
                 ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
                 ("5 <= 4 != 3 >= 4", "((5 <= 4) != (3 >= 4))"),
                 ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
                 ("a || b && c", "(a || (b && c))"),
                 ("a && b == c", "(a && (b == c))"),
                 ("2 ** 3 ** 2", "(2 ** (3 ** 2))"),
                 ("-2 ** 2", "(-(2 ** 2))"),
                 ("-a ** -b", "(-(a ** (-b)))"),
                 ("!a ** b + c", "((!(a ** b)) + c)"),
                 ("2 * 3 ** 2", "(2 * (3 ** 2))"),
                 ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
                 ("-(5 + 5)", "(-(5 + 5))"),
                 ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
                 ("add(a * b[2], b[1], 2 * [1, 2][1])",
                  "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"),
                 ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
                 ("f(1)(2)", "f(1)(2)")];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source), expected, "source: {source}");
    }
}

#[test]
fn statements() {
    assert_eq!(parse_ok("let x = 5;"), "let x = 5;");
    assert_eq!(parse_ok("let y = true"), "let y = true;");
    assert_eq!(parse_ok("x = x + 1;"), "x = (x + 1);");
    assert_eq!(parse_ok("return 5;"), "return 5;");
    assert_eq!(parse_ok("return;"), "return;");
    assert_eq!(parse_ok("{ let a = 1; a }"), "{ let a = 1; a }");
    assert_eq!(parse_ok("{}"), "{}");
    assert_eq!(parse_ok("1; 2"), "1\n2");
}

#[test]
fn literals() {
    assert_eq!(parse_ok(r#""hello world""#), r#""hello world""#);
    assert_eq!(parse_ok("1.5"), "1.5");
    assert_eq!(parse_ok("null"), "null");
    assert_eq!(parse_ok("[]"), "[]");
    assert_eq!(parse_ok("({})"), "{}");
    assert_eq!(parse_ok(r#"({"one": 1, two: 1 + 1})"#), r#"{"one": 1, two: (1 + 1)}"#);
}

#[test]
fn if_expressions() {
    assert_eq!(parse_ok("if (x < y) { x }"), "if (x < y) { x }");
    assert_eq!(parse_ok("if (x < y) { x } else { y }"), "if (x < y) { x } else { y }");
    assert_eq!(parse_ok("if a { 1 } else if b { 2 } else { 3 }"),
               "if a { 1 } else { if b { 2 } else { 3 } }");
}

#[test]
fn function_literals() {
    assert_eq!(parse_ok("fn(x, y) { x + y; }"), "fn(x, y) { (x + y) }");
    assert_eq!(parse_ok("fn() {}"), "fn() {}");
    assert_eq!(parse_ok("let add = fn(a, b) { return a + b; };"),
               "let add = fn(a, b) { return (a + b); };");
}

#[test]
fn tree_shape_of_an_infix_expression() {
    let (program, errors) = parse(lex("1 + 2"));
    assert!(errors.is_empty());

    let expected = Statement::Expression { expr:     Expr::Infix { left:     Box::new(Expr::Integer(1)),
                                                                    op:       InfixOperator::Add,
                                                                    right:    Box::new(Expr::Integer(2)),
                                                                    position: Position::new(1, 3), },
                                           position: Position::new(1, 1), };
    assert_eq!(program.statements, vec![expected]);
}

#[test]
fn missing_tokens_are_reported_with_expected_and_found() {
    let (_, errors) = parse(lex("let x 5;"));

    assert_eq!(errors,
               vec![ParseError::ExpectedToken { expected: TokenKind::Assign,
                                                found:    TokenKind::Int,
                                                position: Position::new(1, 7), }]);
    assert_eq!(errors[0].to_string(),
               "Error on line 1, column 7: expected next token to be =, got INT instead.");
}

#[test]
fn unclosed_delimiters() {
    assert_eq!(parse_errors("(1 + 2"),
               vec!["Error on line 1, column 7: expected next token to be ), got EOF instead."]);
    assert_eq!(parse_errors("fn(x) { x"),
               vec!["Error on line 1, column 10: expected next token to be }, got EOF instead."]);
}

#[test]
fn errors_accumulate_in_source_order() {
    let errors = parse_errors("let = 1;\nlet y 2;\nlet 3;");

    assert_eq!(errors,
               vec!["Error on line 1, column 5: expected next token to be IDENT, got = instead.",
                    "Error on line 2, column 7: expected next token to be =, got INT instead.",
                    "Error on line 3, column 5: expected next token to be IDENT, got INT instead."]);
}

#[test]
fn recovery_keeps_the_good_statements() {
    let (program, errors) = parse(lex("let a = 1; let = 2; let b = a + 1; b"));

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "let a = 1;\nlet b = (a + 1);\nb");
}

#[test]
fn recovery_inside_blocks_keeps_the_block() {
    let (program, errors) = parse(lex("let f = fn() { let = 1; 2 }; f()"));

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "let f = fn() { 2 };\nf()");
}

#[test]
fn recovery_skips_the_rest_of_a_broken_hash() {
    let (program, errors) = parse(lex(r#"let f = fn() { let h = {"a" 1}; 5 };"#));

    assert_eq!(errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
               vec!["Error on line 1, column 29: expected next token to be :, got INT instead."]);
    assert_eq!(program.to_string(), "let f = fn() { 5 };");
}

#[test]
fn recovery_skips_nested_blocks_of_a_broken_statement() {
    let source = "let g = fn() {\n  let x = if (1 { 2 } else { 3 };\n  x\n};\ng";
    let (program, errors) = parse(lex(source));

    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(program.to_string(), "let g = fn() { x };\ng");
}

#[test]
fn error_on_a_closing_brace_ends_the_block() {
    let (program, errors) = parse(lex("let f = fn() { 1 + }; f"));

    assert_eq!(errors, vec![ParseError::NoPrefixRule { token:    TokenKind::RBrace,
                                                       position: Position::new(1, 20), }]);
    assert_eq!(program.to_string(), "let f = fn() {};\nf");
}

#[test]
fn stray_closing_brace_is_reported() {
    let errors = parse_errors("1 }\n2");

    assert_eq!(errors, vec!["Error on line 1, column 3: no prefix parse rule for }."]);
}

#[test]
fn literal_and_token_errors() {
    assert_eq!(parse_errors("99999999999999999999"),
               vec!["Error on line 1, column 1: could not parse 99999999999999999999 as integer."]);
    assert_eq!(parse_errors("1 + @"), vec!["Error on line 1, column 5: illegal token '@'."]);
    assert_eq!(parse_errors("fn(a, b, a) { a }"),
               vec!["Error on line 1, column 10: duplicate parameter 'a'."]);
}

#[test]
fn hash_at_statement_start_is_a_block() {
    assert!(!parse_errors(r#"{"a": 1}"#).is_empty());
    assert!(parse_errors(r#"({"a": 1})"#).is_empty());
}

#[test]
fn partial_program_still_evaluates() {
    let (program, errors) = parse(lex("let x = 2; let y = ; x * 3"));

    assert_eq!(errors.len(), 1);
    let env = jet::interpreter::environment::Environment::new();
    assert_eq!(jet::eval(&program, &env),
               Ok(jet::interpreter::value::core::Value::Integer(6)));
}

#[test]
fn precedence_table_is_ordered() {
    let ladder = [Precedence::Lowest,
                  Precedence::LogicalOr,
                  Precedence::LogicalAnd,
                  Precedence::Equals,
                  Precedence::LessGreater,
                  Precedence::Sum,
                  Precedence::Product,
                  Precedence::Power,
                  Precedence::Prefix,
                  Precedence::Call,
                  Precedence::Index];

    for pair in ladder.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[1].lower(), pair[0]);
    }
}

#[test]
fn precedence_table_entries() {
    let rows = [(TokenKind::Or, Precedence::LogicalOr, Associativity::Left),
                (TokenKind::And, Precedence::LogicalAnd, Associativity::Left),
                (TokenKind::Equal, Precedence::Equals, Associativity::Left),
                (TokenKind::NotEqual, Precedence::Equals, Associativity::Left),
                (TokenKind::LessEqual, Precedence::LessGreater, Associativity::Left),
                (TokenKind::Plus, Precedence::Sum, Associativity::Left),
                (TokenKind::Percent, Precedence::Product, Associativity::Left),
                (TokenKind::Power, Precedence::Power, Associativity::Right),
                (TokenKind::LParen, Precedence::Call, Associativity::Left),
                (TokenKind::LBracket, Precedence::Index, Associativity::Left)];

    for (kind, precedence, associativity) in rows {
        let entry = infix_rule(kind).unwrap_or_else(|| panic!("no infix rule for {kind}"));
        assert_eq!(entry.precedence, precedence, "{kind}");
        assert_eq!(entry.associativity, associativity, "{kind}");
        assert_eq!(infix_precedence(kind), precedence, "{kind}");
    }

    assert_eq!(infix_rule(TokenKind::LParen).map(|e| e.rule), Some(InfixRule::Call));
    assert_eq!(infix_rule(TokenKind::Minus).map(|e| e.rule),
               Some(InfixRule::Operator(InfixOperator::Sub)));
    assert_eq!(infix_precedence(TokenKind::Semicolon), Precedence::Lowest);
    assert_eq!(infix_precedence(TokenKind::Bang), Precedence::Lowest);
}

#[test]
fn prefix_rules() {
    assert_eq!(prefix_rule(TokenKind::Minus), Some(PrefixRule::Operator));
    assert_eq!(prefix_rule(TokenKind::Bang), Some(PrefixRule::Operator));
    assert_eq!(prefix_rule(TokenKind::LBrace), Some(PrefixRule::Hash));
    assert_eq!(prefix_rule(TokenKind::LBracket), Some(PrefixRule::Array));
    assert_eq!(prefix_rule(TokenKind::Function), Some(PrefixRule::Function));
    assert_eq!(prefix_rule(TokenKind::RParen), None);
    assert_eq!(prefix_rule(TokenKind::Eof), None);
}
