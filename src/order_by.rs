use crate::{
    ast::{OrderTerm, Reference, Segment},
    lexer::{Lexer, SyntaxError},
    ops::{CompileError, ExprOps, SymbolTable},
    parser::Parser,
};

pub use crate::ast::Direction;

/// A resolved sort key: a reference expression tagged with its direction and
/// the field name a pagination cursor must expose for it.
///
/// `expr` is the base (unwrapped) expression; [`term`](SortKey::term) applies
/// the injected descending marker when the key is descending, which is the
/// form to hand to the storage layer's ORDER BY. The pagination builder works
/// on the base expression, so direction never has to be recovered by
/// unwrapping marker objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey<T> {
    expr: T,
    field: String,
    direction: Direction,
}

impl<T: Clone> SortKey<T> {
    pub fn new(expr: T, field: impl Into<String>, direction: Direction) -> Self {
        SortKey {
            expr,
            field: field.into(),
            direction,
        }
    }

    /// The base expression, without any direction marker.
    pub fn expr(&self) -> &T {
        &self.expr
    }

    /// The cursor field name this key compares against.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Ascending
    }

    /// The renderable ordering term: the base expression, wrapped with the
    /// injected descending marker when this key is descending.
    pub fn term<O: ExprOps<Expr = T>>(&self, ops: &O) -> T {
        match self.direction {
            Direction::Ascending => self.expr.clone(),
            Direction::Descending => ops.descending(self.expr.clone()),
        }
    }
}

/// Compiles order-by strings into ordered sort keys.
///
/// Like [`FilterCompiler`](crate::FilterCompiler), construction fixes the
/// configuration and instances are immutable and shareable.
///
/// # Examples
///
/// ```
/// use listql::{Direction, NativeOps, OrderByCompiler, SymbolTable, Value};
/// use std::collections::HashMap;
///
/// let mut book = HashMap::new();
/// book.insert("title".to_string(), Value::String("Dune".to_string()));
///
/// let mut symbols = SymbolTable::new();
/// symbols.insert_value("book", Value::Object(book));
///
/// let compiler = OrderByCompiler::new(NativeOps, symbols);
/// let keys = compiler.compile("book.title desc").unwrap().unwrap();
/// assert_eq!(keys[0].field(), "title");
/// assert_eq!(keys[0].direction(), Direction::Descending);
/// ```
pub struct OrderByCompiler<O: ExprOps> {
    ops: O,
    symbols: SymbolTable<O::Expr>,
}

impl<O: ExprOps> OrderByCompiler<O> {
    pub fn new(ops: O, symbols: SymbolTable<O::Expr>) -> Self {
        OrderByCompiler { ops, symbols }
    }

    /// Parses and resolves an order-by string.
    ///
    /// Keys come back in priority order: first term is the primary sort key.
    /// Returns `Ok(None)` for an empty order-by; callers wanting stable
    /// pagination must then fall back to their own default ordering,
    /// typically a unique field.
    pub fn compile(&self, query: &str) -> Result<Option<Vec<SortKey<O::Expr>>>, CompileError> {
        let mut parser = Parser::new(Lexer::new(query))?;
        let Some(order_by) = parser.parse_order_by()? else {
            return Ok(None);
        };

        let keys = order_by
            .terms
            .iter()
            .map(|term| self.sort_key(term))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(keys))
    }

    fn sort_key(&self, term: &OrderTerm) -> Result<SortKey<O::Expr>, CompileError> {
        let expr = self.reference(&term.field)?;
        Ok(SortKey::new(
            expr,
            cursor_field(&term.field),
            term.direction,
        ))
    }

    /// Resolves a field reference through the symbol table and the injected
    /// accessors, left to right.
    fn reference(&self, reference: &Reference) -> Result<O::Expr, CompileError> {
        let mut value = self.symbols.value(&reference.variable)?;
        for segment in &reference.segments {
            value = match segment {
                Segment::Attribute(name) => self.ops.getattr(value, name)?,
                Segment::Index(arg) => {
                    // The order-by grammar only admits literal indexes.
                    let crate::ast::Arg::Literal(literal) = arg else {
                        return Err(CompileError::Syntax(SyntaxError::new(
                            "order-by index arguments must be literals",
                            0,
                        )));
                    };
                    let key = self.ops.literal(literal);
                    self.ops.getitem(value, key)?
                }
            };
        }
        Ok(value)
    }
}

/// The cursor field name of a reference: the last attribute in the chain,
/// falling back to the root variable for bare references.
fn cursor_field(reference: &Reference) -> String {
    reference
        .segments
        .iter()
        .rev()
        .find_map(|segment| match segment {
            Segment::Attribute(name) => Some(name.clone()),
            Segment::Index(_) => None,
        })
        .unwrap_or_else(|| reference.variable.clone())
}
