// tests/order_by_tests.rs

use listql::{CompileError, Direction, NativeOps, OrderByCompiler, SymbolTable, Value};
use std::collections::HashMap;

fn book() -> Value {
    let mut map = HashMap::new();
    map.insert("title".to_string(), Value::String("Dune".to_string()));
    map.insert("author".to_string(), Value::String("Herbert".to_string()));
    map.insert("pages".to_string(), Value::Integer(412));
    Value::Object(map)
}

fn compiler() -> OrderByCompiler<NativeOps> {
    let mut symbols = SymbolTable::new();
    symbols.insert_value("book", book());
    symbols.insert_value("title", Value::String("Dune".to_string()));
    OrderByCompiler::new(NativeOps, symbols)
}

#[test]
fn test_empty_order_by_is_absent() {
    assert!(compiler().compile("").unwrap().is_none());
    assert!(compiler().compile("  ").unwrap().is_none());
}

#[test]
fn test_single_field_defaults_ascending() {
    let keys = compiler().compile("book.title").unwrap().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].field(), "title");
    assert_eq!(keys[0].direction(), Direction::Ascending);
    assert_eq!(keys[0].expr(), &Value::String("Dune".to_string()));
}

#[test]
fn test_desc_keyword() {
    let keys = compiler().compile("book.title desc").unwrap().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].direction(), Direction::Descending);
}

#[test]
fn test_multiple_terms_preserve_priority() {
    let keys = compiler()
        .compile("book.title, book.author desc")
        .unwrap()
        .unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].field(), "title");
    assert_eq!(keys[0].direction(), Direction::Ascending);
    assert_eq!(keys[1].field(), "author");
    assert_eq!(keys[1].direction(), Direction::Descending);
}

#[test]
fn test_bare_reference_field_is_variable_name() {
    let keys = compiler().compile("title").unwrap().unwrap();
    assert_eq!(keys[0].field(), "title");
}

#[test]
fn test_desc_is_case_sensitive() {
    assert!(matches!(
        compiler().compile("book.title DESC"),
        Err(CompileError::Syntax(_))
    ));
}

#[test]
fn test_renderable_term_under_native_bindings() {
    // NativeOps has no ordering wrapper, so term() is the base expression
    // either way; direction still lives on the key.
    let keys = compiler().compile("book.pages desc").unwrap().unwrap();
    assert_eq!(keys[0].term(&NativeOps), Value::Integer(412));
    assert!(!keys[0].is_ascending());
}

#[test]
fn test_unknown_field_root() {
    assert!(matches!(
        compiler().compile("publisher.name"),
        Err(CompileError::UnknownSymbol(_))
    ));
}

#[test]
fn test_trailing_comma_is_malformed() {
    assert!(matches!(
        compiler().compile("book.title,"),
        Err(CompileError::Syntax(_))
    ));
}

#[test]
fn test_comparison_is_not_an_order_by() {
    assert!(matches!(
        compiler().compile("book.pages > 100"),
        Err(CompileError::Syntax(_))
    ));
}
