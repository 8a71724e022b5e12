//! # Term Typeset - Semantic Type Inference for Rust
//!
//! Term Typeset decides what a column of values *means* before it is
//! profiled: whether the text `"Y"`, `"n"`, `"y"` is really a boolean, whether
//! `"1"`, `"2"`, ..., `"99"` are numbers, or whether a numeric column with two
//! distinct values is better summarised as a category.
//!
//! ## Overview
//!
//! Classification works on a graph of semantic types:
//!
//! - every type has a `contains` predicate (could the column, as stored,
//!   belong to the type) and an `infers` predicate (is this the type to report);
//! - types form a containment tree rooted at the catch-all `Unsupported`;
//! - relations are conditional, directed coercions between types
//!   (`Categorical -> Numeric` parses textual numbers).
//!
//! Inference finds the cheapest chain of applicable coercions ending in a type
//! that infers the coerced column, and falls back to `Unsupported` when there
//! is none.
//!
//! ## Quick Start
//!
//! ```rust
//! use term_typeset::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let typeset = Typeset::builder()
//!     .low_categorical_threshold(0)
//!     .build()?;
//!
//! let column = Column::new("catnum", (1..100).map(|c| c.to_string()));
//! assert!(typeset.contains(&column, "Categorical")?);
//!
//! let inference = typeset.infer_type(&column);
//! assert_eq!(inference.type_name, "Numeric");
//! assert_eq!(inference.column.values()[0], Value::Int(1));
//!
//! let text = typeset.convert(&Column::new("flags", [1i64, 0, 1]), "Categorical");
//! assert!(text.is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Features
//!
//! - **Built-in profiling types**: `Boolean`, `Numeric`, `DateTime`,
//!   `Categorical`, with optional `URL` and `Path` refinements
//! - **Configurable**: low-cardinality threshold, boolean vocabulary and
//!   date parsing through [`config::Settings`], loadable from JSON
//! - **Extensible**: register custom types and relations on the builder
//! - **Arrow interop**: read columns straight from Arrow arrays and record
//!   batches
//! - **Structured logging** with the `tracing` crate
//!
//! ## Architecture
//!
//! - **`column`**: values, columns and Arrow conversion
//! - **`typeset`**: semantic types, relations, the type graph and the
//!   inference engine
//! - **`config`**: settings
//! - **`logging`**: log configuration and subscriber setup
//! - **`error`**: error types

pub mod column;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
pub mod typeset;
