// tests/lexer_tests.rs

use listql::{Lexer, Token};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut result = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return result;
        }
        result.push(token);
    }
}

#[test]
fn test_comparators() {
    assert_eq!(
        tokens("= != < <= > >= :"),
        vec![
            Token::Equals,
            Token::NotEquals,
            Token::LessThan,
            Token::LessEquals,
            Token::GreaterThan,
            Token::GreaterEquals,
            Token::Has,
        ]
    );
}

#[test]
fn test_delimiters() {
    assert_eq!(
        tokens(". , ( ) [ ] - +"),
        vec![
            Token::Dot,
            Token::Comma,
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
            Token::Minus,
            Token::Plus,
        ]
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(
        tokens("AND and OR or NOT not"),
        vec![
            Token::And,
            Token::Identifier("and".to_string()),
            Token::Or,
            Token::Identifier("or".to_string()),
            Token::Not,
            Token::Identifier("not".to_string()),
        ]
    );
}

#[test]
fn test_boolean_literals_are_capitalized() {
    assert_eq!(
        tokens("True False true false"),
        vec![
            Token::Boolean(true),
            Token::Boolean(false),
            Token::Identifier("true".to_string()),
            Token::Identifier("false".to_string()),
        ]
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        tokens("book page_count _internal x2"),
        vec![
            Token::Identifier("book".to_string()),
            Token::Identifier("page_count".to_string()),
            Token::Identifier("_internal".to_string()),
            Token::Identifier("x2".to_string()),
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("42 3.14 5. .5 1e3 1.5e-3 2E+4"),
        vec![
            Token::Integer(42),
            Token::Float(3.14),
            Token::Float(5.0),
            Token::Float(0.5),
            Token::Float(1e3),
            Token::Float(1.5e-3),
            Token::Float(2e4),
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens(r#""double" 'single'"#),
        vec![
            Token::String("double".to_string()),
            Token::String("single".to_string()),
        ]
    );
}

#[test]
fn test_string_escapes() {
    // The opening quote and backslash can be escaped; other backslashes are
    // kept literally.
    assert_eq!(
        tokens(r#"'it\'s' "a\\b" 'back\slash'"#),
        vec![
            Token::String("it's".to_string()),
            Token::String("a\\b".to_string()),
            Token::String("back\\slash".to_string()),
        ]
    );
}

#[test]
fn test_restriction_stream() {
    assert_eq!(
        tokens("book.tags[0]:'scifi'"),
        vec![
            Token::Identifier("book".to_string()),
            Token::Dot,
            Token::Identifier("tags".to_string()),
            Token::LBracket,
            Token::Integer(0),
            Token::RBracket,
            Token::Has,
            Token::String("scifi".to_string()),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("'oops");
    let err = lexer.next_token().unwrap_err();
    assert!(err.to_string().contains("unterminated"));
}

#[test]
fn test_lone_bang() {
    let mut lexer = Lexer::new("!");
    assert!(lexer.next_token().is_err());
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("price € 5");
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Identifier("price".to_string()))
    );
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.position, 6);
}
