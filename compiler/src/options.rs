//! Configuration for a generation run.

/// Average gap between enum values above which no name table is emitted.
pub const DEFAULT_MAX_SPARSENESS: i64 = 5;

pub const DEFAULT_HEADER: &str = "// automatically generated, do not modify";

#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    pub(crate) max_sparseness: i64,
    pub(crate) header:         String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_sparseness: DEFAULT_MAX_SPARSENESS,
            header:         DEFAULT_HEADER.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enum sparseness threshold.
    pub fn max_sparseness(mut self, value: i64) -> Self {
        self.max_sparseness = value;
        self
    }

    /// Set the comment written at the top of every generated file.
    pub fn header(mut self, value: impl Into<String>) -> Self {
        self.header = value.into();
        self
    }
}
