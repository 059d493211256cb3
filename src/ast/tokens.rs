/// Lexical tokens shared by the filter and order-by languages.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal, optionally signed at the parser level
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 314
    /// ```
    Integer(i64),

    /// Floating-point literal, with optional exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 1.5e-3
    /// ```
    Float(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "dune"
    /// 'it\'s'
    /// ```
    String(String),

    /// Boolean literal, written `True` or `False` (case-sensitive)
    Boolean(bool),

    // Identifiers and keywords
    /// Field name, variable, or function name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores. `desc` is an ordinary identifier; the order-by parser
    /// gives it meaning after a field.
    ///
    /// # Examples
    /// ```text
    /// title
    /// page_count
    /// _internal
    /// ```
    Identifier(String),

    /// Conjunction keyword (`AND`, uppercase only)
    And,

    /// Disjunction keyword (`OR`, uppercase only)
    Or,

    /// Negation keyword (`NOT`, uppercase only)
    ///
    /// Equivalent to the `-` prefix.
    Not,

    // Comparators
    /// Equality (`=`)
    Equals,

    /// Inequality (`!=`)
    NotEquals,

    /// Less than (`<`)
    LessThan,

    /// Less than or equal (`<=`)
    LessEquals,

    /// Greater than (`>`)
    GreaterThan,

    /// Greater than or equal (`>=`)
    GreaterEquals,

    /// The HAS operator (`:`)
    ///
    /// Maps to the injected containment test.
    ///
    /// # Examples
    /// ```text
    /// authors:"herbert"
    /// title:"du"
    /// ```
    Has,

    // Prefix operators
    /// Negation prefix (also the sign of a negative literal argument)
    Minus,

    /// Sign of an explicitly positive literal argument
    Plus,

    // Delimiters
    /// Dot for attribute access
    Dot,

    /// Comma separating function arguments or order-by terms
    Comma,

    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Left bracket for index access
    LBracket,

    /// Right bracket
    RBracket,

    /// End of input
    Eof,
}
