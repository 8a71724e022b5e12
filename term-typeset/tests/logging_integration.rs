//! Integration tests for logging setup.
//!
//! Runs in its own test binary because the subscriber is process-global.

use term_typeset::logging::setup::{init_logging, LoggingConfig};
use term_typeset::logging::LogConfig;
use term_typeset::prelude::*;

#[test]
fn test_init_logging_once() {
    let config = LoggingConfig::development()
        .with_json_format(true)
        .with_env_filter("term_typeset=debug");
    assert!(init_logging(config).is_ok());

    // a second global subscriber is refused
    assert!(init_logging(LoggingConfig::production()).is_err());

    let typeset = Typeset::builder()
        .log_config(LogConfig::verbose())
        .low_categorical_threshold(0)
        .build()
        .unwrap();
    let inference = typeset.infer_type(&Column::new("flags", ["yes", "no", "Yes"]));
    assert_eq!(inference.type_name, "Boolean");
}
