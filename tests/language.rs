use std::fs;

use jet::{
    Error,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::Evaluator,
            function::builtin::{BuiltinFn, first, last, len, push, rest},
        },
        lexer::Position,
        value::core::Value,
    },
    run,
};
use walkdir::WalkDir;

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "jet"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;

        match expectation(&content) {
            Some(Expect::Value(expected)) => match run(&content) {
                Ok(value) => assert_eq!(value.inspect(), expected, "script {path:?}"),
                Err(e) => panic!("Script {path:?} failed:\n{content}\nError: {e}"),
            },
            Some(Expect::Error(fragment)) => match run(&content) {
                Ok(value) => panic!("Script {path:?} succeeded with {value} but was expected to fail"),
                Err(e) => assert!(e.to_string().contains(&fragment),
                                  "script {path:?}: {e} does not mention {fragment:?}"),
            },
            None => panic!("Script {path:?} has no `// expect:` header"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

enum Expect {
    Value(String),
    Error(String),
}

fn expectation(content: &str) -> Option<Expect> {
    content.lines().find_map(|line| {
                       let line = line.trim();
                       if let Some(rest) = line.strip_prefix("// expect-error:") {
                           Some(Expect::Error(rest.trim().to_string()))
                       } else {
                           line.strip_prefix("// expect:")
                               .map(|rest| Expect::Value(rest.trim().to_string()))
                       }
                   })
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    match run(src) {
        Ok(value) => assert_eq!(value, expected.into(), "source: {src}"),
        Err(e) => panic!("Script failed: {e}\nsource: {src}"),
    }
}

fn assert_int(src: &str, expected: i64) {
    assert_value(src, expected);
}

fn assert_inspect(src: &str, expected: &str) {
    match run(src) {
        Ok(value) => assert_eq!(value.inspect(), expected, "source: {src}"),
        Err(e) => panic!("Script failed: {e}\nsource: {src}"),
    }
}

fn assert_runtime_error(src: &str, fragment: &str) {
    match run(src) {
        Err(Error::Runtime(e)) => {
            assert!(e.to_string().contains(fragment), "{e} does not mention {fragment:?}");
        },
        Err(Error::Parse(errors)) => panic!("Script did not parse: {errors:?}"),
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
    }
}

#[test]
fn precedence_is_respected() {
    assert_int("1 + 2 * 3", 7);
    assert_int("(1 + 2) * 3", 9);
    assert_int("2 ** 3 ** 2", 512);
    assert_int("-2 ** 2", -4);
    assert_int("(-2) ** 2", 4);
    assert_int("10 - 4 - 3", 3);
    assert_value("1 < 2 == true", true);
    assert_value("true || false && false", true);
}

#[test]
fn integer_arithmetic() {
    assert_int("7 / 2", 3);
    assert_int("-7 / 2", -3);
    assert_int("7 % 3", 1);
    assert_int("-7 % 3", -1);
    assert_int("2 ** 0", 1);
    assert_int("--5", 5);
}

#[test]
fn integer_failures_are_errors() {
    assert_runtime_error("1 / 0", "division by zero");
    assert_runtime_error("1 % 0", "division by zero");
    assert_runtime_error("9223372036854775807 + 1", "integer overflow");
    assert_runtime_error("2 ** 63", "integer overflow");
    assert_runtime_error("-9223372036854775807 - 2", "integer overflow");
}

#[test]
fn float_arithmetic_and_promotion() {
    assert_value("1.5 + 1", 2.5);
    assert_value("1 + 1.5", 2.5);
    assert_value("3 / 2.0", 1.5);
    assert_value("2 ** -1", 0.5);
    assert_value("5.5 % 2", 1.5);
    assert_value("1 == 1.0", true);
    assert_value("2 > 1.5", true);
    assert_inspect("2.0 * 1", "2.0");
    assert_runtime_error("1.0 / 0", "division by zero");
    assert_runtime_error("9007199254740993 + 0.5", "cannot be represented exactly");
}

#[test]
fn strings() {
    assert_inspect(r#""foo" + "bar""#, "foobar");
    assert_value(r#""a" < "b""#, true);
    assert_value(r#""abc" == "abc""#, true);
    assert_value(r#""abc" != "abd""#, true);
    assert_int(r#"len("héllo")"#, 5);
    assert_inspect(r#""jet"[1]"#, "e");
    assert_value(r#""jet"[3]"#, Value::Null);
    assert_inspect(r#""tab\tnew\nline""#, "tab\tnew\nline");
    assert_runtime_error(r#""a" - "b""#, "unknown operator: STRING - STRING");
}

#[test]
fn equality_across_types() {
    assert_value("1 == true", false);
    assert_value("1 != true", true);
    assert_value(r#""1" == 1"#, false);
    assert_value("null == null", true);
    assert_value("[1, [2]] == [1, [2]]", true);
    assert_value(r#"({"a": 1}) == {"a": 1}"#, true);
    assert_value("let f = fn() { 1 }; f == f", true);
    assert_value("fn() { 1 } == fn() { 1 }", false);
}

#[test]
fn numeric_equality_is_the_same_at_every_depth() {
    assert_value("1 == 1.0", true);
    assert_value("[1] == [1.0]", true);
    assert_value("[1, [2]] == [1.0, [2.0]]", true);
    assert_value("[1] != [1.5]", true);
    assert_value(r#"({"a": 1}) == {"a": 1.0}"#, true);
    assert_value(r#"({"a": [3]}) == {"a": [3.0]}"#, true);
    assert_value("9007199254740993 == 9007199254740992.0", false);
    assert_value("0 == -0.0", true);
}

#[test]
fn integral_float_keys_address_integer_entries() {
    assert_int("({1.0: 10})[1]", 10);
    assert_int("len({1: 10, 1.0: 20})", 1);
    assert_int("({1: 10, 1.0: 20})[1]", 20);
    assert_inspect("({2.0: true, 0.5: false})", "{2: true, 0.5: false}");
    assert_value("({1: 1}) == {1.0: 1}", true);
}

#[test]
fn operator_errors_name_types() {
    assert_runtime_error("5 + true", "type mismatch: INTEGER + BOOLEAN");
    assert_runtime_error("true + false", "unknown operator: BOOLEAN + BOOLEAN");
    assert_runtime_error("-true", "unknown operator: -BOOLEAN");
    assert_runtime_error("[1] < [2]", "unknown operator: ARRAY < ARRAY");
    assert_runtime_error("null > 1", "type mismatch: NULL > INTEGER");
}

#[test]
fn truthiness_and_logic() {
    assert_value("!null", true);
    assert_value("!0", false);
    assert_value(r#"!"""#, false);
    assert_int("if (0) { 1 } else { 2 }", 1);
    assert_int("if (null) { 1 } else { 2 }", 2);
    assert_value("if (false) { 1 }", Value::Null);
    assert_value("1 && 2", true);
    assert_value("null || false", false);
}

#[test]
fn logical_operators_short_circuit() {
    assert_value("false && missing", false);
    assert_value("true || missing", true);
    assert_runtime_error("true && missing", "identifier not found: missing");
}

#[test]
fn else_if_chains() {
    let classify = "let classify = fn(n) {
                        if (n < 0) { \"negative\" } else if (n == 0) { \"zero\" } else { \"positive\" }
                    };";
    assert_inspect(&format!("{classify} classify(-3)"), "negative");
    assert_inspect(&format!("{classify} classify(0)"), "zero");
    assert_inspect(&format!("{classify} classify(8)"), "positive");
}

#[test]
fn let_shadows_outer_bindings() {
    assert_int("let x = 1; let f = fn() { let x = 2; x }; f(); x", 1);
    assert_int("let x = 1; { let x = 2; } x", 1);
    assert_int("let x = 1; if (true) { let x = 2; } x", 1);
    assert_int("let x = 1; let x = x + 1; x", 2);
}

#[test]
fn reassignment_updates_nearest_binding() {
    assert_int("let x = 1; let f = fn() { x = 2; }; f(); x", 2);
    assert_int("let x = 1; { x = x + 10; } x", 11);
    assert_int("let x = 1; let f = fn() { let x = 5; x = 6; x }; f() + x", 7);
    assert_runtime_error("y = 1", "cannot assign to undefined identifier: y");
}

#[test]
fn shadowing_counter_restarts() {
    let src = "let newCounter = fn() { let c = 0; fn() { let c = c + 1; c } };
               let counter = newCounter();
               [counter(), counter()]";
    assert_inspect(src, "[1, 1]");
}

#[test]
fn reassigning_counter_accumulates() {
    let src = "let newCounter = fn() { let c = 0; fn() { c = c + 1; c } };
               let counter = newCounter();
               [counter(), counter()]";
    assert_inspect(src, "[1, 2]");
}

#[test]
fn separate_counters_do_not_share_state() {
    let src = "let newCounter = fn() { let c = 0; fn() { c = c + 1; c } };
               let a = newCounter();
               let b = newCounter();
               a(); a();
               [a(), b()]";
    assert_inspect(src, "[3, 1]");
}

#[test]
fn closures_capture_their_defining_scope() {
    assert_int("let adder = fn(x) { fn(y) { x + y } }; let add2 = adder(2); add2(3)", 5);
    assert_int("let x = 1; let f = fn() { x }; x = 5; f()", 5);
    assert_int("let x = 1; let f = fn() { x }; let g = fn() { let x = 100; f() }; g()", 1);
}

#[test]
fn functions_and_returns() {
    assert_int("let f = fn(a, b) { a * b }; f(6, 7)", 42);
    assert_int("let f = fn() { return 1; 2 }; f()", 1);
    assert_int("let f = fn(x) { if (x > 1) { return 10; } 20 }; f(5)", 10);
    assert_value("let f = fn() { return; }; f()", Value::Null);
    assert_value("let f = fn() { let a = 1; }; f()", Value::Null);
    assert_int("fn(x) { x * 2 }(21)", 42);
    assert_int("return 3; 4", 3);
}

#[test]
fn recursion() {
    let fib = "let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } };";
    assert_int(&format!("{fib} fib(15)"), 610);
}

#[test]
fn higher_order_functions() {
    let src = "let map = fn(arr, f) {
                   let iter = fn(arr, acc) {
                       if (len(arr) == 0) { acc } else { iter(rest(arr), push(acc, f(first(arr)))) }
                   };
                   iter(arr, [])
               };
               map([1, 2, 3], fn(x) { x * 2 })";
    assert_inspect(src, "[2, 4, 6]");
}

#[test]
fn call_errors() {
    assert_runtime_error("let f = fn(a) { a }; f()", "wrong number of arguments: expected 1, got 0");
    assert_runtime_error("5()", "not a function: INTEGER");
    assert_runtime_error("len(1, 2)", "wrong number of arguments: expected 1, got 2");
}

#[test]
fn runaway_recursion_is_an_error() {
    assert_runtime_error("let f = fn(n) { f(n + 1) }; f(0)", "maximum call depth");
}

#[test]
fn errors_abort_the_rest_of_the_block() {
    assert_runtime_error("let f = fn() { 1 + true; 5 }; f()", "type mismatch: INTEGER + BOOLEAN");
    assert_runtime_error("if (true) { missing; 5 }", "identifier not found: missing");
}

#[test]
fn unknown_identifier_is_a_runtime_error() {
    match run("foobar") {
        Err(Error::Runtime(e)) => assert!(e.to_string().contains("identifier not found: foobar")),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn arrays() {
    assert_int("[1, 2, 3][0]", 1);
    assert_int("[1, 2, 3][1 + 1]", 3);
    assert_value("[1, 2, 3][3]", Value::Null);
    assert_value("[1, 2, 3][-1]", Value::Null);
    assert_int("len([1, 2, 3])", 3);
    assert_int("first([7, 8])", 7);
    assert_int("last([7, 8])", 8);
    assert_value("first([])", Value::Null);
    assert_value("rest([])", Value::Null);
    assert_inspect("rest([1, 2, 3])", "[2, 3]");
    assert_inspect("let a = [1]; let b = push(a, 2); [a, b]", "[[1], [1, 2]]");
    assert_inspect(r#"["a", 1.0, null, true]"#, r#"["a", 1.0, null, true]"#);
    assert_runtime_error("[1][true]", "index operator not supported: ARRAY[BOOLEAN]");
    assert_runtime_error("first(1)", "argument must be ARRAY, got INTEGER");
}

#[test]
fn hashes() {
    assert_int(r#"({"one": 1, "two": 2})["two"]"#, 2);
    assert_value(r#"({"one": 1})["three"]"#, Value::Null);
    assert_int("({1: 10, true: 20, null: 30})[true]", 20);
    assert_int("({1: 10})[1.0]", 10);
    assert_value("({1: 10})[1.5]", Value::Null);
    assert_int(r#"let key = "k"; ({key: 5})["k"]"#, 5);
    assert_int(r#"len({"a": 1, "a": 2})"#, 1);
    assert_inspect(r#"({"b": 2, "a": [1]})"#, r#"{"a": [1], "b": 2}"#);
    assert_runtime_error("({[1]: 2})", "unusable as hash key: ARRAY");
    assert_runtime_error(r#"({"a": 1})[fn() { 1 }]"#, "unusable as hash key: FUNCTION");
}

#[test]
fn builtin_handlers_reject_wrong_argument_counts() {
    let mut evaluator = Evaluator::new();
    let at = Position::default();
    let unary: [BuiltinFn; 4] = [len, first, last, rest];

    for handler in unary {
        assert_eq!(handler(&mut evaluator, &[], at),
                   Err(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                             found:    0,
                                                             position: at, }));
    }

    let array = Value::from(vec![Value::Integer(1)]);
    assert_eq!(push(&mut evaluator, &[array.clone()], at),
               Err(RuntimeError::ArgumentCountMismatch { expected: 2,
                                                         found:    1,
                                                         position: at, }));
    assert_eq!(push(&mut evaluator, &[array, Value::Integer(2)], at),
               Ok(Value::from(vec![Value::Integer(1), Value::Integer(2)])));
    assert_runtime_error("len()", "wrong number of arguments: expected 1, got 0");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_int("let len = fn(x) { 42 }; len([1])", 42);
    assert_inspect("len", "builtin function len");
}

#[test]
fn block_statements_and_hash_statements() {
    assert_int("{ 1; 2 }", 2);
    assert_int(r#"({"a": 1})["a"]"#, 1);
}

#[test]
fn comments_are_ignored() {
    assert_int("// leading comment\nlet x = 3; // trailing\nx * 2", 6);
}

#[test]
fn syntax_errors_prevent_evaluation() {
    match run("let x = 1; let = 2; let y 3;") {
        Err(Error::Parse(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("unexpected result {other:?}"),
    }
}
