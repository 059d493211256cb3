use std::collections::HashMap;

use thiserror::Error;

use crate::{ast::Literal, lexer::SyntaxError};

/// Errors raised while compiling a filter or order-by string.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The query text does not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A reference's root identifier (or attribute, under accessor bindings
    /// that check attribute names) has no entry.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A function-call name has no symbol-table entry, or the entry is not
    /// callable.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// Result of invoking an injected operation.
pub type OpResult<T> = Result<T, CompileError>;

/// The operator bindings a compiler resolves queries through.
///
/// `Expr` is whatever representation the caller wants predicates built in: a
/// native [`Value`](crate::value::Value) for in-memory evaluation, or a
/// database expression object so the compiled predicate is directly usable
/// as a storage-layer query fragment. The compilers never inspect an `Expr`;
/// they only thread it through these operations.
///
/// All combinators are pure; implementations must not hold mutable state, so
/// one bundle can serve concurrent compiles.
pub trait ExprOps {
    type Expr: Clone;

    /// Lifts a scalar literal into the expression representation.
    fn literal(&self, literal: &Literal) -> Self::Expr;

    /// Attribute projection (`obj.name`).
    fn getattr(&self, obj: Self::Expr, name: &str) -> OpResult<Self::Expr>;

    /// Index projection (`obj[key]`).
    fn getitem(&self, obj: Self::Expr, key: Self::Expr) -> OpResult<Self::Expr>;

    /// Negation (`NOT x`, `-x`).
    fn not(&self, expr: Self::Expr) -> Self::Expr;

    /// Conjunction, from the `AND` keyword or adjacency.
    fn and(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;

    /// Disjunction (`OR`).
    fn or(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;

    fn eq(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn ne(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn lt(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn le(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn gt(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn ge(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;

    /// The `:` operator: does `left` contain/include `right`.
    fn has(&self, left: Self::Expr, right: Self::Expr) -> Self::Expr;

    /// Marks a sort key descending (e.g. wraps a column in `DESC`). For
    /// bindings with no renderable ordering concept this can be identity.
    fn descending(&self, key: Self::Expr) -> Self::Expr;
}

/// A callable symbol-table entry, invoked positionally with resolved
/// arguments.
pub type Function<T> = Box<dyn Fn(Vec<T>) -> OpResult<T> + Send + Sync>;

/// One symbol-table entry: the root value of a reference chain, or a
/// caller-defined function.
pub enum Symbol<T> {
    Value(T),
    Function(Function<T>),
}

/// Maps root identifiers to values and function names to callables.
///
/// Built once at compiler construction and immutable afterwards.
pub struct SymbolTable<T> {
    entries: HashMap<String, Symbol<T>>,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        SymbolTable {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> SymbolTable<T> {
    pub fn new() -> Self {
        SymbolTable {
            entries: HashMap::new(),
        }
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.entries.insert(name.into(), Symbol::Value(value));
        self
    }

    pub fn insert_function(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(Vec<T>) -> OpResult<T> + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries
            .insert(name.into(), Symbol::Function(Box::new(function)));
        self
    }

    /// Resolves the root of a reference chain. A callable entry has no
    /// expression value, so it cannot stand as a reference root.
    pub fn value(&self, name: &str) -> OpResult<T> {
        match self.entries.get(name) {
            Some(Symbol::Value(value)) => Ok(value.clone()),
            _ => Err(CompileError::UnknownSymbol(name.to_string())),
        }
    }

    /// Resolves a function-call name to its callable.
    pub fn function(&self, name: &str) -> OpResult<&Function<T>> {
        match self.entries.get(name) {
            Some(Symbol::Function(function)) => Ok(function),
            _ => Err(CompileError::UnknownFunction(name.to_string())),
        }
    }
}
