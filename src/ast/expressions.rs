use serde::{Deserialize, Serialize};

/// A scalar literal appearing in a query or a pagination cursor.
///
/// Serializes untagged so cursors round-trip as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Integer, optionally signed
    Integer(i64),

    /// Float, optionally signed, optional exponent
    Float(f64),

    /// `True` or `False`
    Boolean(bool),

    /// Quoted string, surrounding quotes stripped
    String(String),
}

/// Comparators usable in a restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Equal (`=`)
    Equals,
    /// Not equal (`!=`)
    NotEquals,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEquals,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEquals,
    /// Containment (`:`)
    Has,
}

/// A dotted/indexed access path rooted at a symbol-table entry.
///
/// # Examples
/// ```text
/// book
/// book.title
/// book.authors[0].name
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Root identifier, looked up in the symbol table
    pub variable: String,
    /// Projections applied left to right
    pub segments: Vec<Segment>,
}

/// One projection step in a reference chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Attribute access (`.name`)
    Attribute(String),
    /// Index access (`[arg]`)
    Index(Arg),
}

/// The left side of a restriction: a reference or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    /// A bare reference
    Member(Reference),

    /// A function call resolved through the symbol table
    ///
    /// # Example
    /// ```text
    /// contains(book.title, "du")
    /// ```
    Function { name: String, args: Vec<Arg> },
}

/// An argument to a comparator or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A reference or nested function call
    Comparable(Comparable),
    /// A parenthesized sub-expression
    Composite(Box<FilterExpr>),
    /// A scalar literal
    Literal(Literal),
}

/// Syntax tree node for the filter language.
///
/// `And` and `Or` keep their children as ordered lists; the compiler
/// left-folds the injected combinator over them. Single-child groups are
/// collapsed by the parser, so every node here is structurally meaningful.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Conjunction, from the `AND` keyword or adjacency
    And(Vec<FilterExpr>),

    /// Disjunction, from the `OR` keyword
    Or(Vec<FilterExpr>),

    /// Negation, from a `NOT` or `-` prefix
    Not(Box<FilterExpr>),

    /// A restriction: `comparable [comparator arg]`
    ///
    /// With no comparison the resolved comparable stands on its own, which
    /// is how bare boolean fields are written.
    Restriction {
        comparable: Comparable,
        comparison: Option<(Comparator, Arg)>,
    },
}

/// Sort direction of an order-by term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The default when no keyword follows the field
    Ascending,
    /// Marked with the `desc` keyword
    Descending,
}

/// One `field [desc]` term of an order-by expression.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub field: Reference,
    pub direction: Direction,
}

/// A parsed order-by expression: one or more terms, primary key first.
///
/// An empty order-by string parses to `None` upstream, never to an empty
/// term list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub terms: Vec<OrderTerm>,
}
