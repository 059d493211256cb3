use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    ast::Literal,
    ops::{CompileError, ExprOps, OpResult},
};

/// A native value used by the default operator bindings.
///
/// This plays the role of "whatever the caller's records look like" when no
/// storage-expression bindings are injected: symbol tables hold these, and
/// compiled predicates come back as `Value::Boolean` results. Production
/// deployments typically inject database-expression bindings instead and
/// never touch this type.
///
/// # Examples
///
/// ```
/// use listql::Value;
/// use std::collections::HashMap;
///
/// let mut book = HashMap::new();
/// book.insert("title".to_string(), Value::String("Dune".to_string()));
/// book.insert("pages".to_string(), Value::Integer(412));
/// let book = Value::Object(book);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Null,

    /// Boolean
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),
}

impl Value {
    /// Check if the value is truthy (for predicate results)
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Integer(n) => *n != 0,
            Float(n) => *n != 0.0,
            String(s) => !s.is_empty(),
            Array(arr) => !arr.is_empty(),
            Object(obj) => !obj.is_empty(),
        }
    }

    /// Get as float, coercing integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Ordering between two values where one exists: numerics compare
    /// cross-type, strings and booleans compare within type.
    fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }

    fn equals(&self, other: &Value) -> bool {
        match self.compare(other) {
            Some(ordering) => ordering == Ordering::Equal,
            None => self == other,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Integer(n) => Value::Integer(*n),
            Literal::Float(n) => Value::Float(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

/// Operator bindings over native [`Value`]s.
///
/// Mirrors what a dynamic language's built-in operators would do: attribute
/// access reads object keys, comparisons are numeric-aware, boolean
/// combinators work on truthiness, and `:` means containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOps;

impl ExprOps for NativeOps {
    type Expr = Value;

    fn literal(&self, literal: &Literal) -> Value {
        literal.into()
    }

    fn getattr(&self, obj: Value, name: &str) -> OpResult<Value> {
        match obj {
            Value::Object(mut map) => map
                .remove(name)
                .ok_or_else(|| CompileError::UnknownSymbol(name.to_string())),
            _ => Err(CompileError::UnknownSymbol(name.to_string())),
        }
    }

    fn getitem(&self, obj: Value, key: Value) -> OpResult<Value> {
        match (obj, &key) {
            (Value::Array(mut arr), Value::Integer(i)) => {
                let index = if *i < 0 { arr.len() as i64 + i } else { *i };
                if index < 0 || index as usize >= arr.len() {
                    return Err(CompileError::UnknownSymbol(format!("index {i}")));
                }
                Ok(arr.swap_remove(index as usize))
            }
            (Value::Object(mut map), Value::String(k)) => map
                .remove(k)
                .ok_or_else(|| CompileError::UnknownSymbol(k.clone())),
            _ => Err(CompileError::UnknownSymbol(format!("index {key:?}"))),
        }
    }

    fn not(&self, expr: Value) -> Value {
        Value::Boolean(!expr.is_truthy())
    }

    fn and(&self, left: Value, right: Value) -> Value {
        Value::Boolean(left.is_truthy() && right.is_truthy())
    }

    fn or(&self, left: Value, right: Value) -> Value {
        Value::Boolean(left.is_truthy() || right.is_truthy())
    }

    fn eq(&self, left: Value, right: Value) -> Value {
        Value::Boolean(left.equals(&right))
    }

    fn ne(&self, left: Value, right: Value) -> Value {
        Value::Boolean(!left.equals(&right))
    }

    fn lt(&self, left: Value, right: Value) -> Value {
        Value::Boolean(left.compare(&right) == Some(Ordering::Less))
    }

    fn le(&self, left: Value, right: Value) -> Value {
        Value::Boolean(matches!(
            left.compare(&right),
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    fn gt(&self, left: Value, right: Value) -> Value {
        Value::Boolean(left.compare(&right) == Some(Ordering::Greater))
    }

    fn ge(&self, left: Value, right: Value) -> Value {
        Value::Boolean(matches!(
            left.compare(&right),
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    fn has(&self, left: Value, right: Value) -> Value {
        let contained = match (&left, &right) {
            (Value::String(haystack), Value::String(needle)) => haystack.contains(needle),
            (Value::Array(items), needle) => items.iter().any(|item| item.equals(needle)),
            (Value::Object(map), Value::String(key)) => map.contains_key(key),
            _ => false,
        };
        Value::Boolean(contained)
    }

    /// Native values carry no ordering concept; direction lives on the sort
    /// key itself.
    fn descending(&self, key: Value) -> Value {
        key
    }
}
