use crate::error::ConfigError;
use serde::Deserialize;
use std::{fs, path::Path};

/// Deepest level of type nesting the loader will walk; a file is level 1.
pub const MAX_LOAD_DEPTH: usize = 5;

///
/// Config
///
/// Tunables for one compilation. Every key is optional in TOML.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_nesting_depth: usize,

    /// How many activations of the same message type may be live at once
    /// while building one sample.
    pub max_recursion_depth: usize,

    pub max_repeated: usize,
    pub max_map_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_LOAD_DEPTH,
            max_recursion_depth: 4,
            max_repeated: 4,
            max_map_entries: 4,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&s)
    }
}
