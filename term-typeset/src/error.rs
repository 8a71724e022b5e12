//! Error types for the typeset engine.

use thiserror::Error;

/// Result type for typeset operations.
pub type Result<T> = std::result::Result<T, TypesetError>;

/// Errors that can occur while building a typeset or converting columns.
///
/// Classification itself never fails: `contains` on a registered type,
/// `detect_type` and `infer_type` always return an answer.
#[derive(Error, Debug)]
pub enum TypesetError {
    /// No applicable relation path leads from the column's type to the target.
    #[error("Cannot convert column '{column}' from {from} to {to}")]
    InvalidConversion {
        column: String,
        from: String,
        to: String,
    },

    /// A relation was asked to coerce a column it does not apply to.
    #[error("Relation {relation} does not apply to column '{column}'")]
    ContractViolation { relation: String, column: String },

    /// The named semantic type is not registered in this typeset.
    #[error("Unknown semantic type: {0}")]
    UnknownType(String),

    /// Two semantic types were registered under the same name.
    #[error("Semantic type registered twice: {0}")]
    DuplicateType(String),

    /// The type graph is malformed (missing root, dangling edge, self-loop).
    #[error("Invalid type graph: {0}")]
    InvalidGraph(String),

    /// Invalid settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An Arrow array of a type with no column representation.
    #[error("Unsupported Arrow data type: {0}")]
    UnsupportedArrowType(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading settings.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TypesetError {
    /// Creates an invalid conversion error.
    pub fn invalid_conversion(
        column: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::InvalidConversion {
            column: column.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates a contract violation error for a relation and column.
    pub fn contract_violation(relation: impl Into<String>, column: impl Into<String>) -> Self {
        Self::ContractViolation {
            relation: relation.into(),
            column: column.into(),
        }
    }

    /// Creates an invalid graph error with the given message.
    pub fn invalid_graph(msg: impl Into<String>) -> Self {
        Self::InvalidGraph(msg.into())
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Converts serde_json errors to TypesetError.
impl From<serde_json::Error> for TypesetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
