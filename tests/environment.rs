use jet::{
    interpreter::{
        environment::{Environment, collector::ScopeCollector},
        evaluator::core::Evaluator,
        lexer::Position,
        value::core::Value,
    },
    lex, parse,
};
use pretty_assertions::assert_eq;

fn eval_in(source: &str, env: &Environment) -> Option<Value> {
    let (program, errors) = parse(lex(source));
    assert!(errors.is_empty(), "{errors:?}");
    Evaluator::new().eval_program(&program, env).unwrap()
}

#[test]
fn scope_is_dropped_with_its_last_handle() {
    let root = Environment::new();
    let scope = Environment::enclosed(&root);
    let weak = scope.downgrade();

    assert!(weak.upgrade().is_some_and(|scope| scope.get("x").is_none()));
    drop(scope);
    assert!(!weak.is_alive());
}

#[test]
fn self_capturing_scope_is_collected() {
    let mut collector = ScopeCollector::new();
    let root = Environment::new();
    let scope = Environment::enclosed(&root);
    collector.track(&scope);
    eval_in("let f = fn() { 1 }; let g = fn() { f() };", &scope);

    let weak = scope.downgrade();
    drop(scope);
    assert!(weak.is_alive());
    assert_eq!(collector.live(), 1);

    assert_eq!(collector.collect(), 1);
    assert!(!weak.is_alive());
    assert_eq!(collector.live(), 0);
}

#[test]
fn scope_held_from_outside_survives() {
    let mut collector = ScopeCollector::new();
    let root = Environment::new();
    let scope = Environment::enclosed(&root);
    collector.track(&scope);
    eval_in("let x = 5; let f = fn() { x };", &scope);

    assert_eq!(collector.collect(), 0);
    assert_eq!(scope.get("x"), Some(Value::Integer(5)));

    // A closure bound in the untracked root keeps its scope alive.
    root.define("kept", scope.get("f").unwrap());
    drop(scope);
    assert_eq!(collector.collect(), 0);
    assert_eq!(eval_in("kept()", &root), Some(Value::Integer(5)));

    root.define("kept", Value::Null);
    assert_eq!(collector.collect(), 1);
    assert_eq!(collector.live(), 0);
}

#[test]
fn closure_held_by_the_caller_survives() {
    let mut collector = ScopeCollector::new();
    let scope = Environment::enclosed(&Environment::new());
    collector.track(&scope);
    eval_in("let y = 7; let f = fn() { y };", &scope);

    let f = scope.get("f").unwrap();
    drop(scope);
    assert_eq!(collector.collect(), 0);

    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.apply_function(&f, vec![], Position::default()), Ok(Value::Integer(7)));

    drop(f);
    assert_eq!(collector.collect(), 1);
}

#[test]
fn cycles_through_collections_and_nested_scopes_are_collected() {
    let mut collector = ScopeCollector::new();
    let outer = Environment::enclosed(&Environment::new());
    let inner = Environment::enclosed(&outer);
    collector.track(&outer);
    collector.track(&inner);

    // `outer` reaches `inner` through a hash inside an array, and `inner`
    // reaches `outer` through its enclosing link.
    let f = eval_in("fn() { 1 }", &inner).unwrap();
    outer.define("table", eval_in("[{\"a\": 1}]", &outer).unwrap());
    outer.define("f", Value::Array(vec![Value::Integer(1), f].into()));

    let weak_outer = outer.downgrade();
    let weak_inner = inner.downgrade();
    drop((outer, inner));
    assert!(weak_outer.is_alive() && weak_inner.is_alive());

    assert_eq!(collector.collect(), 2);
    assert!(!weak_outer.is_alive());
    assert!(!weak_inner.is_alive());
}

#[test]
fn shared_array_held_outside_keeps_its_closures() {
    let mut collector = ScopeCollector::new();
    let scope = Environment::enclosed(&Environment::new());
    collector.track(&scope);
    let list = eval_in("let g = fn() { 2 }; [g]", &scope).unwrap();

    let weak = scope.downgrade();
    drop(scope);
    assert_eq!(collector.collect(), 0);
    assert!(weak.is_alive());

    drop(list);
    assert_eq!(collector.collect(), 1);
    assert!(!weak.is_alive());
}
