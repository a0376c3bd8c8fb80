use crate::prelude::*;
use std::{fs, path::Path};

///
/// FileDescriptor
///
/// One schema container, the unit a compiled `.proto` file would produce.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FileDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDescriptor>,
}

impl FileDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            messages: Vec::new(),
            enums: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: MessageDescriptor) -> Self {
        self.messages.push(message);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.push(descriptor);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = read(path.as_ref())?;

        Self::from_json_str(&json)
    }
}

/// Load a JSON array of files, as a descriptor set would hold them.
pub fn load_descriptor_set(path: impl AsRef<Path>) -> Result<Vec<FileDescriptor>, SchemaError> {
    let json = read(path.as_ref())?;

    Ok(serde_json::from_str(&json)?)
}

fn read(path: &Path) -> Result<String, SchemaError> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })
}
