// tests/integration_tests.rs
//
// End-to-end listing flow: compile a filter and an order-by per record,
// page through the collection with cursors carried in encoded tokens.

use listql::{
    Cursor, FilterCompiler, Literal, NativeOps, OrderByCompiler, PageToken, SortKey, SymbolTable,
    Value, page_clause,
};
use std::collections::HashMap;

struct Book {
    title: &'static str,
    author: &'static str,
    pages: i64,
}

const LIBRARY: &[Book] = &[
    Book {
        title: "Dune",
        author: "Herbert",
        pages: 412,
    },
    Book {
        title: "Foundation",
        author: "Asimov",
        pages: 255,
    },
    Book {
        title: "Hyperion",
        author: "Simmons",
        pages: 482,
    },
    Book {
        title: "Neuromancer",
        author: "Gibson",
        pages: 271,
    },
    Book {
        title: "Solaris",
        author: "Lem",
        pages: 204,
    },
];

fn symbols_for(book: &Book) -> SymbolTable<Value> {
    let mut fields = HashMap::new();
    fields.insert("title".to_string(), Value::String(book.title.to_string()));
    fields.insert(
        "author".to_string(),
        Value::String(book.author.to_string()),
    );
    fields.insert("pages".to_string(), Value::Integer(book.pages));

    let mut symbols = SymbolTable::new();
    symbols.insert_value("book", Value::Object(fields));
    symbols
}

fn native_cmp(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        _ => std::cmp::Ordering::Equal,
    }
}

fn matches_filter(book: &Book, filter: &str) -> bool {
    let compiler = FilterCompiler::new(NativeOps, symbols_for(book));
    match compiler.compile(filter).unwrap() {
        Some(predicate) => predicate.is_truthy(),
        // Absent filter matches everything, by the caller's choice.
        None => true,
    }
}

fn sort_keys(book: &Book, order_by: &str) -> Vec<SortKey<Value>> {
    OrderByCompiler::new(NativeOps, symbols_for(book))
        .compile(order_by)
        .unwrap()
        .unwrap()
}

fn cursor_for(book: &Book, order_by: &str) -> Cursor {
    sort_keys(book, order_by)
        .iter()
        .map(|key| {
            let value = match key.expr() {
                Value::String(s) => Literal::String(s.clone()),
                Value::Integer(n) => Literal::Integer(*n),
                other => panic!("unexpected key value {other:?}"),
            };
            (key.field().to_string(), value)
        })
        .collect()
}

/// One page of a list request: filter, sort, bound by the token's cursor,
/// take `page_size`, and mint the next token.
fn list_page(
    filter: &str,
    order_by: &str,
    page_size: usize,
    token: Option<&str>,
) -> (Vec<&'static str>, Option<String>) {
    let mut books: Vec<&Book> = LIBRARY
        .iter()
        .filter(|book| matches_filter(book, filter))
        .collect();

    // Native in-memory sort standing in for the storage layer.
    books.sort_by(|a, b| {
        let ka = sort_keys(a, order_by);
        let kb = sort_keys(b, order_by);
        ka.iter()
            .zip(kb.iter())
            .map(|(x, y)| {
                let ordering = native_cmp(x.expr(), y.expr());
                if x.is_ascending() {
                    ordering
                } else {
                    ordering.reverse()
                }
            })
            .find(|o| !o.is_eq())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(encoded) = token {
        let token = PageToken::decode(encoded).unwrap();
        token
            .verify(Some(filter), Some(order_by))
            .expect("token matches request");
        books.retain(|book| {
            page_clause(&NativeOps, &sort_keys(book, order_by), &token.cursor)
                .unwrap()
                .is_truthy()
        });
    }

    let page: Vec<&Book> = books.into_iter().take(page_size).collect();
    let next_token = page.last().map(|last| {
        PageToken::new(
            Some(filter.to_string()),
            Some(order_by.to_string()),
            cursor_for(last, order_by),
        )
        .encode()
    });

    (page.iter().map(|b| b.title).collect(), next_token)
}

#[test]
fn test_paging_through_the_whole_collection() {
    let (page1, token1) = list_page("", "book.title", 2, None);
    assert_eq!(page1, vec!["Dune", "Foundation"]);

    let (page2, token2) = list_page("", "book.title", 2, token1.as_deref());
    assert_eq!(page2, vec!["Hyperion", "Neuromancer"]);

    let (page3, _) = list_page("", "book.title", 2, token2.as_deref());
    assert_eq!(page3, vec!["Solaris"]);
}

#[test]
fn test_filtered_paging() {
    let filter = "book.pages > 250";
    let (page1, token1) = list_page(filter, "book.pages desc", 2, None);
    assert_eq!(page1, vec!["Hyperion", "Dune"]);

    let (page2, token2) = list_page(filter, "book.pages desc", 2, token1.as_deref());
    assert_eq!(page2, vec!["Neuromancer", "Foundation"]);

    let (page3, _) = list_page(filter, "book.pages desc", 2, token2.as_deref());
    assert!(page3.is_empty());
}

#[test]
fn test_token_from_different_query_is_rejected() {
    let (_, token) = list_page("", "book.title", 2, None);
    let token = PageToken::decode(&token.unwrap()).unwrap();
    assert!(token.verify(Some("book.pages > 250"), Some("book.title")).is_err());
    assert!(token.verify(Some(""), Some("book.author")).is_err());
}

#[test]
fn test_no_records_after_final_cursor() {
    let order_by = "book.title";
    let last = &LIBRARY[4]; // Solaris sorts last by title
    let cursor = cursor_for(last, order_by);

    let survivors: Vec<&str> = LIBRARY
        .iter()
        .filter(|book| {
            page_clause(&NativeOps, &sort_keys(book, order_by), &cursor)
                .unwrap()
                .is_truthy()
        })
        .map(|b| b.title)
        .collect();
    assert!(survivors.is_empty());
}
