//! Secondary indexes and key ranges.
//!
//! A [`SecondaryIndex`] names the columns of a database index; a
//! [`KeyRange`] selects records by those columns. Composite keys compare
//! lexicographically and every bound is inclusive.

use sea_orm::sea_query::{Condition, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, Value};

use super::error::StoreError;

/// A secondary index over one or more columns of `E`.
pub struct SecondaryIndex<E: EntityTrait> {
    /// Index name, as created by the migrations.
    pub name: &'static str,
    /// Indexed columns, most significant first.
    pub columns: &'static [E::Column],
}

impl<E: EntityTrait> SecondaryIndex<E> {
    /// Declares an index.
    #[must_use]
    pub const fn new(name: &'static str, columns: &'static [E::Column]) -> Self {
        Self { name, columns }
    }
}

impl<E: EntityTrait> std::fmt::Debug for SecondaryIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryIndex")
            .field("name", &self.name)
            .field("columns", &self.columns.len())
            .finish()
    }
}

/// Which records of an index to return.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyRange {
    /// Keys equal to the given values; fewer values than columns match a prefix.
    Only(Vec<Value>),
    /// Keys between `lower` and `upper`, both included.
    Between {
        /// Lower bound.
        lower: Vec<Value>,
        /// Upper bound.
        upper: Vec<Value>,
    },
    /// Keys at or above the bound.
    AtLeast(Vec<Value>),
    /// Keys at or below the bound.
    AtMost(Vec<Value>),
}

#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

impl KeyRange {
    /// Exact match on a single-column key.
    pub fn only(value: impl Into<Value>) -> Self {
        Self::Only(vec![value.into()])
    }

    /// Inclusive range on a single-column key.
    pub fn between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self::Between {
            lower: vec![lower.into()],
            upper: vec![upper.into()],
        }
    }

    /// Lower-bounded range on a single-column key.
    pub fn at_least(lower: impl Into<Value>) -> Self {
        Self::AtLeast(vec![lower.into()])
    }

    /// Upper-bounded range on a single-column key.
    pub fn at_most(upper: impl Into<Value>) -> Self {
        Self::AtMost(vec![upper.into()])
    }

    /// Range from optional inclusive bounds; `None` when both are open.
    pub fn from_bounds<V: Into<Value>>(lower: Option<V>, upper: Option<V>) -> Option<Self> {
        match (lower, upper) {
            (Some(lower), Some(upper)) => Some(Self::between(lower, upper)),
            (Some(lower), None) => Some(Self::at_least(lower)),
            (None, Some(upper)) => Some(Self::at_most(upper)),
            (None, None) => None,
        }
    }

    /// Builds the filter selecting this range over `columns`.
    ///
    /// # Errors
    ///
    /// `InvalidKey` when a bound is empty or longer than the index.
    pub fn condition<C: ColumnTrait>(&self, columns: &[C]) -> Result<Condition, StoreError> {
        match self {
            Self::Only(values) => {
                check_arity(columns, values)?;
                Ok(columns
                    .iter()
                    .zip(values)
                    .fold(Condition::all(), |cond, (col, value)| {
                        cond.add(col.eq(value.clone()))
                    }))
            }
            Self::Between { lower, upper } => {
                check_arity(columns, lower)?;
                check_arity(columns, upper)?;
                Ok(Condition::all()
                    .add(bound(columns, lower, Bound::Lower))
                    .add(bound(columns, upper, Bound::Upper)))
            }
            Self::AtLeast(lower) => {
                check_arity(columns, lower)?;
                Ok(bound(columns, lower, Bound::Lower))
            }
            Self::AtMost(upper) => {
                check_arity(columns, upper)?;
                Ok(bound(columns, upper, Bound::Upper))
            }
        }
    }
}

fn check_arity<C>(columns: &[C], values: &[Value]) -> Result<(), StoreError> {
    if values.is_empty() || values.len() > columns.len() {
        return Err(StoreError::invalid_key(format!(
            "index has {} column(s), key has {} value(s)",
            columns.len(),
            values.len()
        )));
    }
    Ok(())
}

/// Lexicographic comparison of `columns` against `values`.
///
/// `(a, b) >= (x, y)` expands to `a > x OR (a = x AND b >= y)`.
fn bound<C: ColumnTrait>(columns: &[C], values: &[Value], side: Bound) -> Condition {
    match (columns, values) {
        ([col, ..], [value]) => Condition::all().add(inclusive(*col, value, side)),
        ([col, rest_cols @ ..], [value, rest_values @ ..]) => Condition::any()
            .add(strict(*col, value, side))
            .add(
                Condition::all()
                    .add(col.eq(value.clone()))
                    .add(bound(rest_cols, rest_values, side)),
            ),
        _ => Condition::all(),
    }
}

fn inclusive<C: ColumnTrait>(col: C, value: &Value, side: Bound) -> SimpleExpr {
    match side {
        Bound::Lower => col.gte(value.clone()),
        Bound::Upper => col.lte(value.clone()),
    }
}

fn strict<C: ColumnTrait>(col: C, value: &Value, side: Bound) -> SimpleExpr {
    match side {
        Bound::Lower => col.gt(value.clone()),
        Bound::Upper => col.lt(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::entry_lines;
    use sea_orm::{DbBackend, QueryFilter, QueryTrait};

    const PAIR: &[entry_lines::Column] =
        &[entry_lines::Column::EntryId, entry_lines::Column::AccountCode];

    fn sql(range: &KeyRange) -> String {
        let cond = range.condition(PAIR).unwrap();
        entry_lines::Entity::find()
            .filter(cond)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_only_prefix() {
        let query = sql(&KeyRange::only(7i64));
        assert!(query.contains(r#""entry_lines"."entry_id" = 7"#), "{query}");
        assert!(!query.contains("account_code\" ="), "{query}");
    }

    #[test]
    fn test_composite_lower_bound_is_lexicographic() {
        let query = sql(&KeyRange::AtLeast(vec![7i64.into(), "570".into()]));
        assert!(query.contains(r#""entry_lines"."entry_id" > 7"#), "{query}");
        assert!(query.contains(r#""entry_lines"."account_code" >= '570'"#), "{query}");
    }

    #[test]
    fn test_arity_checked() {
        let too_long = KeyRange::Only(vec![1i64.into(), "a".into(), "b".into()]);
        assert!(matches!(too_long.condition(PAIR), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            KeyRange::Only(vec![]).condition(PAIR),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_from_bounds() {
        assert!(KeyRange::from_bounds::<i64>(None, None).is_none());
        assert_eq!(
            KeyRange::from_bounds(Some(1i64), None),
            Some(KeyRange::at_least(1i64))
        );
        assert_eq!(
            KeyRange::from_bounds(Some(1i64), Some(2i64)),
            Some(KeyRange::between(1i64, 2i64))
        );
    }
}
