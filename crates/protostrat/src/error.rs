use protostrat_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("sampling '{name}' failed: {reason}")]
    Sample { name: String, reason: String },
}

///
/// CompileError
///
/// `NotFound` is the only recoverable variant: the loader retries it on a
/// later pass. Every other variant aborts compilation immediately.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("type '{name}' is not in the environment")]
    NotFound { name: String },

    #[error("field '{field}' has unsupported kind '{kind}'")]
    UnsupportedKind { field: String, kind: String },

    #[error("nesting below {max} levels is not supported (reached at '{scope}')")]
    NestingTooDeep { scope: String, max: usize },

    #[error("enum '{name}' declares no values")]
    EmptyEnum { name: String },

    #[error("map entry '{name}' must declare exactly two fields, found {found}")]
    MalformedMapEntry { name: String, found: usize },

    #[error("{} type(s) could not be resolved: {}", names.len(), names.join(", "))]
    Unresolved { names: Vec<String> },
}

impl CompileError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
