//! The built-in profiling typeset.
//!
//! Five core types (`Unsupported`, `Boolean`, `Numeric`, `DateTime`,
//! `Categorical`) plus the optional `Path` and `URL` refinements of
//! `Categorical`, with the relations between them. Type and relation order
//! here is declaration order, which breaks ties during detection and search.

use std::sync::Arc;

use crate::column::Column;
use crate::config::Settings;
use crate::typeset::coercion::{string_to_bool, string_to_datetime, string_to_numeric, to_category};
use crate::typeset::predicates::{
    is_boolean, is_numeric, is_string, is_temporal, numeric_is_category, string_is_bool,
    string_is_datetime, string_is_numeric, string_is_path, string_is_url,
};
use crate::typeset::relation::Relation;
use crate::typeset::semantic::SemanticType;

pub const UNSUPPORTED: &str = "Unsupported";
pub const BOOLEAN: &str = "Boolean";
pub const NUMERIC: &str = "Numeric";
pub const DATETIME: &str = "DateTime";
pub const CATEGORICAL: &str = "Categorical";
pub const PATH: &str = "Path";
pub const URL: &str = "URL";

/// Built-in semantic types for the given settings, in declaration order.
pub fn builtin_types(settings: &Settings) -> Vec<SemanticType> {
    let vars = Arc::new(settings.vars.clone());

    let threshold = vars.num.low_categorical_threshold;
    let numeric = SemanticType::new(NUMERIC, UNSUPPORTED, is_numeric)
        .with_infers(move |c: &Column| !numeric_is_category(c, threshold));

    let cat_vars = Arc::clone(&vars);
    let categorical = SemanticType::new(CATEGORICAL, UNSUPPORTED, is_string).with_infers(
        move |c: &Column| {
            let threshold = cat_vars.num.low_categorical_threshold;
            !string_is_numeric(c, threshold)
                && !string_is_bool(c, &cat_vars.bool.mappings)
                && !(cat_vars.cat.parse_datetime && string_is_datetime(c))
        },
    );

    let mut types = vec![
        SemanticType::catch_all(UNSUPPORTED),
        SemanticType::new(BOOLEAN, UNSUPPORTED, is_boolean),
        numeric,
        SemanticType::new(DATETIME, UNSUPPORTED, is_temporal),
        categorical,
    ];
    if vars.path.active {
        types.push(SemanticType::new(PATH, CATEGORICAL, string_is_path));
    }
    if vars.url.active {
        types.push(SemanticType::new(URL, CATEGORICAL, string_is_url));
    }
    types
}

/// Built-in relations for the given settings, in declaration order.
pub fn builtin_relations(settings: &Settings) -> Vec<Relation> {
    let vars = Arc::new(settings.vars.clone());
    let threshold = vars.num.low_categorical_threshold;

    let numeric_vars = Arc::clone(&vars);
    let bool_vars = Arc::clone(&vars);
    let coerce_vars = Arc::clone(&vars);

    let mut relations = vec![
        Relation::new(
            NUMERIC,
            CATEGORICAL,
            move |c: &Column| numeric_is_category(c, threshold),
            to_category,
        ),
        Relation::new(
            CATEGORICAL,
            NUMERIC,
            move |c: &Column| {
                string_is_numeric(c, threshold) && !string_is_bool(c, &numeric_vars.bool.mappings)
            },
            string_to_numeric,
        ),
        Relation::new(
            CATEGORICAL,
            BOOLEAN,
            move |c: &Column| string_is_bool(c, &bool_vars.bool.mappings),
            move |c: &Column| string_to_bool(c, &coerce_vars.bool.mappings),
        ),
    ];
    if vars.cat.parse_datetime {
        relations.push(Relation::new(
            CATEGORICAL,
            DATETIME,
            string_is_datetime,
            string_to_datetime,
        ));
    }
    relations
}
