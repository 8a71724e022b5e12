//! Typeset settings.
//!
//! Settings are supplied once when a [`Typeset`](crate::typeset::Typeset) is
//! built and stay read-only for its lifetime. The layout mirrors the profiling
//! configuration the typeset is embedded in (`vars.num.low_categorical_threshold`
//! and friends), so a settings document can be shared with the rest of the
//! profiling pipeline.
//!
//! # Example
//!
//! ```rust
//! use term_typeset::config::Settings;
//!
//! let settings = Settings::from_json_str(
//!     r#"{"vars": {"num": {"low_categorical_threshold": 0}}}"#,
//! ).unwrap();
//! assert_eq!(settings.vars.num.low_categorical_threshold, 0);
//! assert!(settings.vars.bool.mappings.contains_key("yes"));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesetError};

/// Root settings object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-type variable settings.
    pub vars: Vars,
}

/// Settings grouped by semantic type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vars {
    pub num: NumVars,
    pub cat: CatVars,
    pub bool: BoolVars,
    pub url: UrlVars,
    pub path: PathVars,
}

/// Numeric settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumVars {
    /// Numeric columns with at least one and at most this many distinct values
    /// are treated as categorical (default: 5). Zero disables the rule.
    pub low_categorical_threshold: usize,
}

impl Default for NumVars {
    fn default() -> Self {
        Self {
            low_categorical_threshold: 5,
        }
    }
}

/// Categorical settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatVars {
    /// Parse date and datetime strings into DateTime columns (default: false).
    pub parse_datetime: bool,
}

/// Boolean settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolVars {
    /// Lowercase string vocabulary recognised as booleans.
    pub mappings: BTreeMap<String, bool>,
}

impl Default for BoolVars {
    fn default() -> Self {
        let mappings = [
            ("t", true),
            ("f", false),
            ("yes", true),
            ("no", false),
            ("y", true),
            ("n", false),
            ("true", true),
            ("false", false),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { mappings }
    }
}

/// URL type settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlVars {
    /// Register the URL type (default: false).
    pub active: bool,
}

/// Path type settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathVars {
    /// Register the Path type (default: false).
    pub active: bool,
}

impl Settings {
    /// Parses settings from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validated()
    }

    /// Reads settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the settings to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the settings and normalises the boolean vocabulary to lowercase.
    pub fn validated(mut self) -> Result<Self> {
        let mut mappings = BTreeMap::new();
        for (key, value) in std::mem::take(&mut self.vars.bool.mappings) {
            let normalized = key.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(TypesetError::invalid_config(
                    "vars.bool.mappings contains an empty key",
                ));
            }
            if let Some(previous) = mappings.insert(normalized.clone(), value) {
                if previous != value {
                    return Err(TypesetError::invalid_config(format!(
                        "vars.bool.mappings maps '{normalized}' to both true and false"
                    )));
                }
            }
        }
        self.vars.bool.mappings = mappings;
        Ok(self)
    }
}
