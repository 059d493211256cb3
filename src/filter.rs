use crate::{
    ast::{Arg, Comparable, Comparator, FilterExpr, Reference, Segment},
    lexer::Lexer,
    ops::{CompileError, ExprOps, SymbolTable},
    parser::Parser,
};

/// Compiles filter strings into predicates built from injected operations.
///
/// Construction fixes the full configuration (operator bindings and symbol
/// table); compiling is a pure function of the query string, so one compiler
/// can be shared across threads and reused for any number of queries.
///
/// # Examples
///
/// ```
/// use listql::{FilterCompiler, NativeOps, SymbolTable, Value};
///
/// let mut symbols = SymbolTable::new();
/// symbols.insert_value("pages", Value::Integer(412));
///
/// let compiler = FilterCompiler::new(NativeOps, symbols);
/// let predicate = compiler.compile("pages > 100").unwrap().unwrap();
/// assert!(predicate.is_truthy());
/// ```
pub struct FilterCompiler<O: ExprOps> {
    ops: O,
    symbols: SymbolTable<O::Expr>,
}

impl<O: ExprOps> FilterCompiler<O> {
    pub fn new(ops: O, symbols: SymbolTable<O::Expr>) -> Self {
        FilterCompiler { ops, symbols }
    }

    /// Parses and reduces a filter string.
    ///
    /// Returns `Ok(None)` for an empty filter: the distinguished "no
    /// predicate" value, which callers must special-case rather than treat
    /// as a predicate that matches nothing (or everything).
    pub fn compile(&self, query: &str) -> Result<Option<O::Expr>, CompileError> {
        let mut parser = Parser::new(Lexer::new(query))?;
        match parser.parse_filter()? {
            Some(tree) => Ok(Some(self.reduce(&tree)?)),
            None => Ok(None),
        }
    }

    /// Bottom-up reduction of the syntax tree into a single expression.
    fn reduce(&self, expr: &FilterExpr) -> Result<O::Expr, CompileError> {
        match expr {
            FilterExpr::And(children) => self.fold(children, |a, b| self.ops.and(a, b)),
            FilterExpr::Or(children) => self.fold(children, |a, b| self.ops.or(a, b)),
            FilterExpr::Not(inner) => Ok(self.ops.not(self.reduce(inner)?)),
            FilterExpr::Restriction {
                comparable,
                comparison,
            } => {
                let obj = self.comparable(comparable)?;
                match comparison {
                    Some((comparator, arg)) => {
                        let arg = self.arg(arg)?;
                        Ok(self.apply(*comparator, obj, arg))
                    }
                    // A lone comparable stands for itself, e.g. a boolean
                    // field.
                    None => Ok(obj),
                }
            }
        }
    }

    /// Left-fold of a combinator over a node's children. The grammar
    /// guarantees at least one child.
    fn fold(
        &self,
        children: &[FilterExpr],
        combine: impl Fn(O::Expr, O::Expr) -> O::Expr,
    ) -> Result<O::Expr, CompileError> {
        let mut reduced = children.iter().map(|child| self.reduce(child));
        let first = reduced
            .next()
            .expect("grammar produces no empty groups")?;
        reduced.try_fold(first, |acc, next| Ok(combine(acc, next?)))
    }

    fn apply(&self, comparator: Comparator, left: O::Expr, right: O::Expr) -> O::Expr {
        match comparator {
            Comparator::Equals => self.ops.eq(left, right),
            Comparator::NotEquals => self.ops.ne(left, right),
            Comparator::LessThan => self.ops.lt(left, right),
            Comparator::LessEquals => self.ops.le(left, right),
            Comparator::GreaterThan => self.ops.gt(left, right),
            Comparator::GreaterEquals => self.ops.ge(left, right),
            Comparator::Has => self.ops.has(left, right),
        }
    }

    fn comparable(&self, comparable: &Comparable) -> Result<O::Expr, CompileError> {
        match comparable {
            Comparable::Member(reference) => self.reference(reference),
            Comparable::Function { name, args } => {
                let function = self.symbols.function(name)?;
                let args = args
                    .iter()
                    .map(|arg| self.arg(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                function(args)
            }
        }
    }

    fn arg(&self, arg: &Arg) -> Result<O::Expr, CompileError> {
        match arg {
            Arg::Comparable(comparable) => self.comparable(comparable),
            Arg::Composite(expr) => self.reduce(expr),
            Arg::Literal(literal) => Ok(self.ops.literal(literal)),
        }
    }

    /// Resolves a reference chain: symbol-table root, then attribute and
    /// index projections left to right. Re-evaluated per use, no caching.
    fn reference(&self, reference: &Reference) -> Result<O::Expr, CompileError> {
        let mut value = self.symbols.value(&reference.variable)?;
        for segment in &reference.segments {
            value = match segment {
                Segment::Attribute(name) => self.ops.getattr(value, name)?,
                Segment::Index(arg) => {
                    let key = self.arg(arg)?;
                    self.ops.getitem(value, key)?
                }
            };
        }
        Ok(value)
    }
}
