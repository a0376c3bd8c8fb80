use crate::prelude::*;
use std::ops::Not;

///
/// MessageDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageDescriptor {
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_messages: Vec<Self>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_enums: Vec<EnumDescriptor>,

    #[serde(default)]
    pub options: MessageOptions,
}

impl MessageDescriptor {
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
            options: MessageOptions::default(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_nested_message(mut self, message: Self) -> Self {
        self.nested_messages.push(message);
        self
    }

    #[must_use]
    pub fn with_nested_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.nested_enums.push(descriptor);
        self
    }

    #[must_use]
    pub const fn deprecated(mut self) -> Self {
        self.options.deprecated = true;
        self
    }

    #[must_use]
    pub const fn map_entry(mut self) -> Self {
        self.options.map_entry = true;
        self
    }

    /// Last segment of the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    // field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fully-qualified name of one of this message's fields, the key used
    /// for per-field overrides.
    #[must_use]
    pub fn field_full_name(&self, field: &str) -> String {
        format!("{}.{field}", self.full_name)
    }
}

///
/// MessageOptions
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageOptions {
    #[serde(default, skip_serializing_if = "Not::not")]
    pub deprecated: bool,

    /// Set on the synthesized key/value message behind a map field.
    #[serde(default, skip_serializing_if = "Not::not")]
    pub map_entry: bool,
}
