//! Semantic type inference over columns.
//!
//! A [`Typeset`] owns a validated [`TypeGraph`] of semantic types and the
//! relations that coerce columns between them. Three questions can be asked
//! of it:
//!
//! - [`Typeset::contains`]: could the column, as it is, belong to a type;
//! - [`Typeset::infer_type`]: which type best describes the column, possibly
//!   after coercing it (numbers stored as text become `Numeric`);
//! - [`Typeset::convert`]: coerce the column into a named type.
//!
//! # Example
//!
//! ```rust
//! use term_typeset::column::Column;
//! use term_typeset::typeset::Typeset;
//!
//! let typeset = Typeset::builder()
//!     .low_categorical_threshold(0)
//!     .build()
//!     .unwrap();
//!
//! let flags = Column::new("flags", [Some("Y"), Some("n"), None]);
//! assert!(typeset.contains(&flags, "Categorical").unwrap());
//!
//! let inference = typeset.infer_type(&flags);
//! assert_eq!(inference.type_name, "Boolean");
//! assert_eq!(inference.path, vec!["Categorical", "Boolean"]);
//! ```

pub mod builtin;
pub mod coercion;
pub mod graph;
pub mod predicates;
pub mod relation;
pub mod semantic;


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::column::Column;
use crate::config::Settings;
use crate::error::{Result, TypesetError};
use crate::logging::{truncate_field, LogConfig};

pub use builtin::{BOOLEAN, CATEGORICAL, DATETIME, NUMERIC, PATH, UNSUPPORTED, URL};
pub use graph::TypeGraph;
pub use relation::{Relation, Transform};
pub use semantic::{Predicate, SemanticType};

/// User-declared types: column name to semantic type name.
pub type TypeSchema = BTreeMap<String, String>;

/// The result of inferring a column's semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    /// Name of the inferred semantic type
    pub type_name: String,
    /// The column in the inferred type's representation
    pub column: Column,
    /// Types visited from the starting type to `type_name`
    pub path: Vec<String>,
    /// Sum of the relation costs along `path`
    pub cost: u32,
}

impl Inference {
    /// Whether the column had to be coerced to reach the inferred type.
    pub fn is_coerced(&self) -> bool {
        self.path.len() > 1
    }
}

/// Builder for [`Typeset`]
#[derive(Debug, Default)]
pub struct TypesetBuilder {
    settings: Settings,
    log_config: LogConfig,
    types: Vec<SemanticType>,
    relations: Vec<Relation>,
}

impl TypesetBuilder {
    /// Replace all settings
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the numeric low-cardinality threshold (0 disables)
    pub fn low_categorical_threshold(mut self, threshold: usize) -> Self {
        self.settings.vars.num.low_categorical_threshold = threshold;
        self
    }

    /// Replace the boolean string vocabulary
    pub fn bool_mappings<I, K>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        self.settings.vars.bool.mappings = mappings
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        self
    }

    /// Enable or disable parsing of date strings
    pub fn parse_datetime(mut self, enable: bool) -> Self {
        self.settings.vars.cat.parse_datetime = enable;
        self
    }

    /// Enable or disable the URL type
    pub fn urls(mut self, enable: bool) -> Self {
        self.settings.vars.url.active = enable;
        self
    }

    /// Enable or disable the Path type
    pub fn paths(mut self, enable: bool) -> Self {
        self.settings.vars.path.active = enable;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Register an additional semantic type after the built-in ones
    pub fn with_type(mut self, semantic_type: SemanticType) -> Self {
        self.types.push(semantic_type);
        self
    }

    /// Register an additional relation after the built-in ones
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Validate the settings and the type graph and build the Typeset
    pub fn build(self) -> Result<Typeset> {
        let settings = self.settings.validated()?;

        let mut types = builtin::builtin_types(&settings);
        types.extend(self.types);
        let mut relations = builtin::builtin_relations(&settings);
        relations.extend(self.relations);

        let graph = TypeGraph::new(types, relations)?;
        debug!(
            types = graph.types().len(),
            relations = graph.relations().len(),
            "Built typeset"
        );

        Ok(Typeset {
            settings,
            graph,
            log_config: self.log_config,
        })
    }
}

/// Semantic type inference engine.
///
/// Immutable once built and safe to share between threads.
#[derive(Debug)]
pub struct Typeset {
    settings: Settings,
    graph: TypeGraph,
    log_config: LogConfig,
}

impl Typeset {
    /// Create a new builder for Typeset
    pub fn builder() -> TypesetBuilder {
        TypesetBuilder::default()
    }

    /// Create a Typeset with the built-in types for the given settings
    pub fn new(settings: Settings) -> Result<Self> {
        Self::builder().settings(settings).build()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// All semantic types in declaration order.
    pub fn types(&self) -> &[SemanticType] {
        self.graph.types()
    }

    pub fn get(&self, name: &str) -> Option<&SemanticType> {
        self.graph.get(name)
    }

    pub fn relations(&self) -> &[Relation] {
        self.graph.relations()
    }

    pub fn relation(&self, source: &str, target: &str) -> Option<&Relation> {
        self.graph.relation(source, target)
    }

    /// Whether the named type contains the column without any coercion.
    pub fn contains(&self, column: &Column, type_name: &str) -> Result<bool> {
        self.get(type_name)
            .map(|ty| ty.contains(column))
            .ok_or_else(|| TypesetError::UnknownType(type_name.to_string()))
    }

    /// The most specific type containing the column in its raw representation.
    pub fn detect_type(&self, column: &Column) -> &SemanticType {
        let path = self.graph.detect_path(column);
        // detect_path always holds at least the root
        self.graph.type_at(path[path.len() - 1])
    }

    /// Infers the semantic type of a column.
    ///
    /// Candidates are the types containing the column, most specific first.
    /// The first candidate that infers the column wins as is; otherwise the
    /// cheapest chain of applicable relations leading to a type that infers the
    /// coerced column wins. Columns nothing infers fall back to the catch-all.
    #[instrument(skip(self, column), fields(column = %column.name(), rows = column.len()))]
    pub fn infer_type(&self, column: &Column) -> Inference {
        let seeds: Vec<usize> = self.graph.detect_path(column).into_iter().rev().collect();

        let hit = self.graph.search(
            &seeds,
            column,
            |ty, candidate| !ty.is_catch_all() && ty.infers(candidate),
            &self.log_config,
        );

        let inference = match hit {
            Some(hit) => Inference {
                type_name: self.graph.type_at(hit.type_idx).name().to_string(),
                column: hit.column,
                path: self.path_names(&hit.path),
                cost: hit.cost,
            },
            None => {
                debug!(column = column.name(), "No type infers the column, falling back");
                Inference {
                    type_name: self.graph.root().name().to_string(),
                    column: column.clone(),
                    path: vec![self.graph.root().name().to_string()],
                    cost: 0,
                }
            }
        };

        debug!(
            column = %truncate_field(column.name(), self.log_config.max_field_length),
            inferred_type = %inference.type_name,
            path = %inference.path.join(" -> "),
            cost = inference.cost,
            "Inferred semantic type"
        );
        inference
    }

    /// Converts the column into the representation of `target`.
    ///
    /// Starts from the types that contain the column as it is; a target among
    /// them returns the column unchanged. Otherwise the cheapest chain of
    /// applicable relations is applied.
    #[instrument(skip(self, column), fields(column = %column.name()))]
    pub fn convert(&self, column: &Column, target: &str) -> Result<Column> {
        self.route(column, target).map(|inference| inference.column)
    }

    /// Infers every column independently, keeping their order.
    #[instrument(skip(self, columns), fields(columns = columns.len()))]
    pub fn infer_columns(&self, columns: &[Column]) -> Vec<Inference> {
        let inferences: Vec<Inference> = columns.iter().map(|c| self.infer_type(c)).collect();
        info!(columns = inferences.len(), "Completed type inference");
        inferences
    }

    /// Infers a column unless the schema declares its type, in which case the
    /// column is converted to the declared type.
    pub fn infer_with_schema(&self, column: &Column, schema: &TypeSchema) -> Result<Inference> {
        let Some(declared) = schema.get(column.name()) else {
            return Ok(self.infer_type(column));
        };

        self.route(column, declared).map_err(|e| {
            warn!(
                column = column.name(),
                declared_type = %declared,
                error = %e,
                "Declared type does not fit the column"
            );
            e
        })
    }

    fn route(&self, column: &Column, target: &str) -> Result<Inference> {
        if self.graph.index_of(target).is_none() {
            return Err(TypesetError::UnknownType(target.to_string()));
        }

        let seeds: Vec<usize> = self.graph.detect_path(column).into_iter().rev().collect();
        let from = self.graph.type_at(seeds[0]).name();

        let hit = self
            .graph
            .search(&seeds, column, |ty, _| ty.name() == target, &self.log_config)
            .ok_or_else(|| TypesetError::invalid_conversion(column.name(), from, target))?;

        let path = self.path_names(&hit.path);
        debug!(
            from,
            to = target,
            path = %path.join(" -> "),
            "Converted column"
        );
        Ok(Inference {
            type_name: target.to_string(),
            column: hit.column,
            path,
            cost: hit.cost,
        })
    }

    fn path_names(&self, path: &[usize]) -> Vec<String> {
        path.iter()
            .map(|&i| self.graph.type_at(i).name().to_string())
            .collect()
    }
}
