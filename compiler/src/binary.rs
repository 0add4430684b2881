//! Output of the serialized root buffer a schema may carry.

use std::fs;
use std::path::{Path, PathBuf};

use brine_flat_schema::Schema;
use tracing::debug;

use crate::error::FlatError;

const DEFAULT_BINARY_EXTENSION: &str = "bin";

pub fn binary_file_name(schema: &Schema, path: &Path, file_name: &str) -> PathBuf {
    let extension = schema
        .file_extension
        .as_deref()
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_BINARY_EXTENSION);
    path.join(format!("{}.{}", file_name, extension))
}

/// Writes the schema's binary buffer, if it has one.
pub fn generate_binary(
    schema: &Schema,
    path: &Path,
    file_name: &str,
) -> Result<Option<PathBuf>, FlatError> {
    if schema.binary.is_empty() {
        return Ok(None);
    }
    let target = binary_file_name(schema, path, file_name);
    fs::write(&target, &schema.binary)?;
    debug!(path = %target.display(), bytes = schema.binary.len(), "wrote binary");
    Ok(Some(target))
}

/// Make rule for the binary produced from `file_name`; empty without one.
pub fn binary_make_rule(schema: &Schema, path: &Path, file_name: &str) -> String {
    if schema.binary.is_empty() {
        return String::new();
    }
    let base = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut make_rule = format!(
        "{}: {}",
        binary_file_name(schema, path, &base).display(),
        file_name
    );
    let root_file = schema.root_struct_def().map(|def| def.file.as_str()).unwrap_or("");
    for included in schema.included_files_recursive(root_file) {
        make_rule += " ";
        make_rule += &included;
    }
    make_rule
}
