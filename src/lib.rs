//! Declarative query sub-languages for list/search APIs: an AIP-160 style
//! boolean **filter** language, an AIP-132 style **order-by** language, and a
//! **keyset pagination** clause builder, all resolved through caller-injected
//! operations rather than any fixed data model.
//!
//! Query text flows through the shared [`Lexer`] and [`Parser`] into a syntax
//! tree, which a compiler reduces bottom-up using an [`ExprOps`] bundle and a
//! [`SymbolTable`]. The result is an opaque predicate (or ordered sort keys)
//! in whatever representation the bindings build: native [`Value`]s for
//! in-memory use, or database expressions for the storage layer. The
//! [`page_clause`] builder then turns sort keys plus a [`Cursor`] into the
//! "strictly after this record" predicate, and [`PageToken`] carries the
//! cursor between requests.
//!
//! Everything here is pure and synchronous: compilers are configured once,
//! hold no mutable state, and can be shared freely across threads.

pub mod ast;
pub mod filter;
pub mod lexer;
pub mod ops;
pub mod order_by;
pub mod page;
pub mod parser;
pub mod value;

pub use ast::{Arg, Comparable, Comparator, FilterExpr, Literal, OrderByExpr, Reference, Token};
pub use filter::FilterCompiler;
pub use lexer::{Lexer, SyntaxError};
pub use ops::{CompileError, ExprOps, OpResult, Symbol, SymbolTable};
pub use order_by::{Direction, OrderByCompiler, SortKey};
pub use page::{Cursor, PageError, PageToken, page_clause};
pub use parser::Parser;
pub use value::{NativeOps, Value};
