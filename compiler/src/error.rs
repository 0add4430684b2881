use brine_flat_schema::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema load error: {0}")]
    SchemaLoad(#[from] serde_json::Error),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Source generation is not supported for {0}")]
    UnsupportedLanguage(String),

    #[error("Language profile table error: {0}")]
    ProfileTable(String),

    #[error("Cannot generate field \"{field}\" of \"{definition}\": {reason}")]
    Unsupported {
        definition: String,
        field:      String,
        reason:     String,
    },

    #[error("Unknown definition: {0}")]
    UnknownDefinition(String),
}
