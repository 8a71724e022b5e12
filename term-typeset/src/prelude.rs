//! Prelude for commonly used types and traits in term-typeset.

pub use crate::column::{columns_from_record_batch, Column, ColumnKind, Value};
pub use crate::config::Settings;
pub use crate::error::{Result, TypesetError};
pub use crate::logging::LogConfig;
pub use crate::typeset::{
    Inference, Relation, SemanticType, TypeSchema, Typeset, TypesetBuilder,
};
