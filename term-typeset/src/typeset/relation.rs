//! Relations: directed, conditional coercions between semantic types.

use std::fmt;
use std::sync::Arc;

use crate::column::Column;
use crate::error::{Result, TypesetError};
use crate::typeset::semantic::Predicate;

/// Shared column transform.
pub type Transform = Arc<dyn Fn(&Column) -> Column + Send + Sync>;

/// A directed edge `source -> target` in the type graph.
///
/// A relation says: a column of the source type may be relabelled as the
/// target type when the predicate holds, after applying the transform. Relations
/// are not symmetric; `Numeric -> Categorical` and `Categorical -> Numeric` are
/// independent edges with their own predicates.
#[derive(Clone)]
pub struct Relation {
    source: String,
    target: String,
    predicate: Predicate,
    transform: Transform,
    cost: u32,
    source_contains: Option<Predicate>,
}

impl Relation {
    /// Creates a relation with the default cost of 1.
    pub fn new<P, T>(
        source: impl Into<String>,
        target: impl Into<String>,
        predicate: P,
        transform: T,
    ) -> Self
    where
        P: Fn(&Column) -> bool + Send + Sync + 'static,
        T: Fn(&Column) -> Column + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            target: target.into(),
            predicate: Arc::new(predicate),
            transform: Arc::new(transform),
            cost: 1,
            source_contains: None,
        }
    }

    /// Sets the cost used to rank competing inference paths.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Whether the column is a source-type column this relation can coerce.
    ///
    /// Once the relation is registered in a type graph this also requires the
    /// source type to contain the column.
    pub fn applies(&self, column: &Column) -> bool {
        self.source_contains
            .as_ref()
            .map_or(true, |contains| contains(column))
            && (self.predicate)(column)
    }

    /// Coerces the column into the target type's representation.
    ///
    /// Fails with [`TypesetError::ContractViolation`] when the relation does not
    /// apply to the column.
    pub fn coerce(&self, column: &Column) -> Result<Column> {
        if !self.applies(column) {
            return Err(TypesetError::contract_violation(
                self.to_string(),
                column.name(),
            ));
        }
        Ok(self.transform_unchecked(column))
    }

    pub(crate) fn transform_unchecked(&self, column: &Column) -> Column {
        let coerced = (self.transform)(column);
        debug_assert_eq!(coerced.len(), column.len(), "{} changed column length", self);
        debug_assert_eq!(coerced.name(), column.name(), "{} renamed the column", self);
        coerced
    }

    pub(crate) fn guarded_by(mut self, source_contains: Predicate) -> Self {
        self.source_contains = Some(source_contains);
        self
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
