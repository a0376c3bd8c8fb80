use crate::prelude::*;
use std::path::PathBuf;

///
/// SchemaError
///
/// Failure to load descriptors from their serialized form.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("invalid descriptor json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read descriptor file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
