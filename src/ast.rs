//! # Abstract syntax trees for the list-query languages
//!
//! This module defines the syntax trees produced by parsing the two query
//! sub-languages exposed by list/search endpoints:
//!
//! - the **filter** language (AIP-160 style boolean restrictions), and
//! - the **order-by** language (AIP-132 style comma-separated sort fields).
//!
//! The module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the shared lexer
//! - **[expressions]** - Syntax tree nodes for both languages, plus the
//!   literal and comparator types they carry
//!
//! ## Filter precedence
//!
//! The filter grammar's nesting, from tightest to loosest binding:
//!
//! ```text
//! simple      restriction, or a parenthesized sub-expression
//! term        simple, optionally negated with NOT or -
//! factor      terms joined by OR
//! sequence    factors joined by adjacency (implicit AND)
//! expression  sequences joined by the AND keyword
//! ```
//!
//! So `a OR b c` groups as `(a OR b) c`, and `a b AND c` groups as
//! `(a b) AND c`.
//!
//! ## Examples
//!
//! ```text
//! title = "dune" AND pages > 100        // filter
//! NOT out_of_print                      // filter, bare boolean field
//! contains(title, "du") OR -archived    // filter, function call + negation
//! title, published desc                 // order-by
//! ```
//!
//! Trees are transient: each one is produced by a single parse and consumed
//! exactly once by the corresponding compiler.

pub mod expressions;
pub mod tokens;

pub use expressions::{
    Arg, Comparable, Comparator, Direction, FilterExpr, Literal, OrderByExpr, OrderTerm, Reference,
    Segment,
};
pub use tokens::Token;
