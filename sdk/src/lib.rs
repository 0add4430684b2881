//! brine-flat
//!
//! Facade over the schema model and the code generators.
//!
//! - `load_schema` / `schema_from_json` read a parsed schema from its JSON form
//! - `generate_general`, `generate_make_rule` and friends (re-exported)

use std::fs;
use std::path::Path;

use tracing::debug;

pub use brine_flat_compiler::error::FlatError;
pub use brine_flat_compiler::{
    binary_file_name, binary_make_rule, generate_binary, generate_general,
    generate_general_with_options, generate_make_rule, Generator, GeneratorOptions, Language,
};
pub use brine_flat_schema::{EnumDef, Field, Namespace, Schema, StructDef, Type};

/// Reads a schema from a JSON document.
pub fn schema_from_json(json: &str) -> Result<Schema, FlatError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a schema from the JSON file at `path`.
pub fn load_schema(path: &Path) -> Result<Schema, FlatError> {
    let text = fs::read_to_string(path)?;
    let schema = schema_from_json(&text)?;
    debug!(
        path = %path.display(),
        enums = schema.enums.len(),
        structs = schema.structs.len(),
        "loaded schema"
    );
    Ok(schema)
}

pub mod error {
    pub use brine_flat_compiler::error::FlatError;
}

pub mod schema {
    pub use brine_flat_schema::*;
}

pub mod layout {
    pub use brine_flat_schema::layout::*;
}
