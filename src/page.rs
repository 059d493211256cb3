use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ast::Literal,
    ops::ExprOps,
    order_by::SortKey,
};

/// Errors raised while building page clauses or handling page tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// The cursor does not carry a field the active order-by needs.
    ///
    /// Indicates caller misuse: the order-by changed between token creation
    /// and token use. Never defaulted over.
    #[error("cursor is missing field '{0}'")]
    CursorFieldMissing(String),

    /// A page token failed to decode, or its stored queries do not match
    /// the request presenting it.
    #[error("invalid page token: {0}")]
    InvalidToken(String),

    /// The page clause was requested with no sort keys at all.
    #[error("cannot build a page clause without sort keys")]
    NoSortKeys,
}

/// A snapshot of one record's sort-key field values, used to resume
/// pagination after that record.
///
/// Field names must match [`SortKey::field`] for every key in the active
/// order-by. Immutable once built; the only mutation surface is
/// construction-time [`insert`](Cursor::insert).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor {
    fields: BTreeMap<String, Literal>,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Literal) -> &mut Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// The stored value for `field`, if the cursor carries it.
    pub fn value(&self, field: &str) -> Option<&Literal> {
        self.fields.get(field)
    }
}

impl<K: Into<String>> FromIterator<(K, Literal)> for Cursor {
    fn from_iter<I: IntoIterator<Item = (K, Literal)>>(iter: I) -> Self {
        Cursor {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The opaque continuation handle passed between page requests.
///
/// A token is only valid for continued pagination if its stored queries
/// exactly match the request presenting it; [`verify`](PageToken::verify)
/// enforces that. The encoding is reversible, not confidential: a token is
/// an opaque handle, not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageToken {
    pub filter_query: Option<String>,
    pub order_by_query: Option<String>,
    pub cursor: Cursor,
}

impl PageToken {
    pub fn new(
        filter_query: Option<String>,
        order_by_query: Option<String>,
        cursor: Cursor,
    ) -> Self {
        PageToken {
            filter_query,
            order_by_query,
            cursor,
        }
    }

    /// Serializes to a URL-safe string.
    pub fn encode(&self) -> String {
        // Serialization of Option/String/BTreeMap/Literal cannot fail.
        let json = serde_json::to_vec(self).expect("token body is always serializable");
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Inverse of [`encode`](PageToken::encode).
    pub fn decode(token: &str) -> Result<Self, PageError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| PageError::InvalidToken(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| PageError::InvalidToken(e.to_string()))
    }

    /// Checks the token against the queries of the request presenting it.
    ///
    /// A mismatch means the client is trying to resume pagination under a
    /// different query shape, which must be rejected, not silently ignored.
    pub fn verify(
        &self,
        filter_query: Option<&str>,
        order_by_query: Option<&str>,
    ) -> Result<(), PageError> {
        if self.filter_query.as_deref() != filter_query {
            return Err(PageError::InvalidToken(
                "token filter does not match request filter".to_string(),
            ));
        }
        if self.order_by_query.as_deref() != order_by_query {
            return Err(PageError::InvalidToken(
                "token order-by does not match request order-by".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds the keyset-pagination predicate: true exactly for records strictly
/// after `cursor` in the lexicographic order defined by `keys`.
///
/// Keys are processed last to first, nesting clauses so that a tie on an
/// earlier key recurses into the later keys while a strict inequality on any
/// key short-circuits:
///
/// ```text
/// k1 >= c1 AND (k1 > c1 OR (k2 >= c2 AND (k2 > c2 OR ...)))
/// ```
///
/// with `>=`/`>` flipped to `<=`/`<` for descending keys. The caller
/// conjoins the result with any filter predicate and sorts by the same key
/// sequence; this builder only bounds, it does not sort.
pub fn page_clause<O: ExprOps>(
    ops: &O,
    keys: &[SortKey<O::Expr>],
    cursor: &Cursor,
) -> Result<O::Expr, PageError> {
    let mut result = None;

    for key in keys.iter().rev() {
        let value = cursor
            .value(key.field())
            .ok_or_else(|| PageError::CursorFieldMissing(key.field().to_string()))?;
        let value = ops.literal(value);

        let (include, exclude) = if key.is_ascending() {
            (
                ops.ge(key.expr().clone(), value.clone()),
                ops.gt(key.expr().clone(), value),
            )
        } else {
            (
                ops.le(key.expr().clone(), value.clone()),
                ops.lt(key.expr().clone(), value),
            )
        };

        result = Some(match result {
            None => exclude,
            Some(rest) => ops.and(include, ops.or(exclude, rest)),
        });
    }

    result.ok_or(PageError::NoSortKeys)
}
