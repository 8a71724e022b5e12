//! Semantic types: named classifications with membership predicates.

use std::fmt;
use std::sync::Arc;

use crate::column::Column;

/// Shared column predicate.
pub type Predicate = Arc<dyn Fn(&Column) -> bool + Send + Sync>;

/// A named classification of columns.
///
/// Every type carries two pure predicates:
///
/// - `contains`: could the column belong to this type, judging only its
///   non-missing values and their raw representation;
/// - `infers`: is this type the canonical choice for the column. `infers`
///   always implies `contains`.
///
/// Types form a containment tree through their `parent`: a child refines its
/// parent (URL strings are also categorical strings). The single type without a
/// parent is the catch-all root, which contains every column.
#[derive(Clone)]
pub struct SemanticType {
    name: String,
    parent: Option<String>,
    contains: Predicate,
    infers: Predicate,
}

impl SemanticType {
    /// Creates a type refining `parent`, inferred whenever it is contained.
    pub fn new<F>(name: impl Into<String>, parent: impl Into<String>, contains: F) -> Self
    where
        F: Fn(&Column) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            contains: Arc::new(contains),
            infers: Arc::new(|_: &Column| true),
        }
    }

    /// Creates the catch-all root type that contains every column.
    pub fn catch_all(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            contains: Arc::new(|_: &Column| true),
            infers: Arc::new(|_: &Column| true),
        }
    }

    /// Narrows when the type is the canonical choice for a column it contains.
    pub fn with_infers<F>(mut self, infers: F) -> Self
    where
        F: Fn(&Column) -> bool + Send + Sync + 'static,
    {
        self.infers = Arc::new(infers);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_catch_all(&self) -> bool {
        self.parent.is_none()
    }

    pub fn contains(&self, column: &Column) -> bool {
        (self.contains)(column)
    }

    pub fn infers(&self, column: &Column) -> bool {
        self.contains(column) && (self.infers)(column)
    }

    pub(crate) fn contains_predicate(&self) -> Predicate {
        Arc::clone(&self.contains)
    }
}

impl fmt::Debug for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticType")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for SemanticType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SemanticType {}
