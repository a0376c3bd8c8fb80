use crate::prelude::*;

///
/// EnumDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnumDescriptor {
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EnumValue>,
}

impl EnumDescriptor {
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
        });
        self
    }

    /// Declared numbers, in declaration order.
    #[must_use]
    pub fn numbers(&self) -> Vec<i32> {
        self.values.iter().map(|v| v.number).collect()
    }
}

///
/// EnumValue
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}
