use crate::prelude::*;

///
/// FieldDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: u32,

    #[serde(default)]
    pub label: Label,

    pub kind: FieldKind,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32, label: Label, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            label,
            kind,
        }
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>, number: u32, label: Label, kind: ScalarKind) -> Self {
        Self::new(name, number, label, FieldKind::Scalar(kind))
    }

    #[must_use]
    pub fn enumeration(
        name: impl Into<String>,
        number: u32,
        label: Label,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(name, number, label, FieldKind::Enum(type_name.into()))
    }

    #[must_use]
    pub fn message(
        name: impl Into<String>,
        number: u32,
        label: Label,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(name, number, label, FieldKind::Message(type_name.into()))
    }
}
