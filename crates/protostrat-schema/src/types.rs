use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Label
///
/// Multiplicity of a field: zero-or-one, zero-or-more, or exactly one value.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    #[display("optional")]
    Optional,
    #[display("repeated")]
    Repeated,
    #[display("required")]
    Required,
}

///
/// ScalarKind
///
/// The primitive field kinds that carry a value directly rather than
/// referencing another type.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum ScalarKind {
    #[display("bool")]
    Bool,
    #[display("bytes")]
    Bytes,
    #[display("double")]
    Double,
    #[display("fixed32")]
    Fixed32,
    #[display("fixed64")]
    Fixed64,
    #[display("float")]
    Float,
    #[display("int32")]
    Int32,
    #[display("int64")]
    Int64,
    #[display("sfixed32")]
    Sfixed32,
    #[display("sfixed64")]
    Sfixed64,
    #[display("sint32")]
    Sint32,
    #[display("sint64")]
    Sint64,
    #[display("string")]
    String,
    #[display("uint32")]
    Uint32,
    #[display("uint64")]
    Uint64,
}

impl ScalarKind {
    pub const ALL: [Self; 15] = [
        Self::Bool,
        Self::Bytes,
        Self::Double,
        Self::Fixed32,
        Self::Fixed64,
        Self::Float,
        Self::Int32,
        Self::Int64,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Sint32,
        Self::Sint64,
        Self::String,
        Self::Uint32,
        Self::Uint64,
    ];

    //
    // grouped helpers
    //

    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(
            self,
            Self::Int32
                | Self::Int64
                | Self::Sint32
                | Self::Sint64
                | Self::Sfixed32
                | Self::Sfixed64
        )
    }

    #[must_use]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            Self::Uint32 | Self::Uint64 | Self::Fixed32 | Self::Fixed64
        )
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    // bit width of the integer kinds, None for everything else
    #[must_use]
    pub const fn int_width(self) -> Option<u32> {
        match self {
            Self::Int32 | Self::Sint32 | Self::Sfixed32 | Self::Uint32 | Self::Fixed32 => Some(32),
            Self::Int64 | Self::Sint64 | Self::Sfixed64 | Self::Uint64 | Self::Fixed64 => Some(64),
            _ => None,
        }
    }

    /// Scalars that protobuf accepts as map keys.
    #[must_use]
    pub const fn is_map_key(self) -> bool {
        self.is_int() || matches!(self, Self::Bool | Self::String)
    }
}

///
/// FieldKind
///
/// What a field holds. References name their target by full name; the
/// pool resolves them.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[display("{_0}")]
    Scalar(ScalarKind),
    #[display("enum {_0}")]
    Enum(String),
    #[display("message {_0}")]
    Message(String),
    #[display("group {_0}")]
    Group(String),
}

impl From<ScalarKind> for FieldKind {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds_round_trip_through_their_keyword() {
        for kind in ScalarKind::ALL {
            let parsed: ScalarKind = kind.to_string().parse().expect("keyword should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn labels_parse_from_their_keyword() {
        assert_eq!("repeated".parse::<Label>().unwrap(), Label::Repeated);
        assert_eq!(Label::Required.to_string().parse::<Label>().unwrap(), Label::Required);
    }

    #[test]
    fn unknown_keywords_are_rejected() {
        assert!("int128".parse::<ScalarKind>().is_err());
        assert!("sometimes".parse::<Label>().is_err());
    }

    #[test]
    fn map_key_kinds_exclude_floats_and_bytes() {
        assert!(ScalarKind::Sint64.is_map_key());
        assert!(ScalarKind::String.is_map_key());
        assert!(!ScalarKind::Double.is_map_key());
        assert!(!ScalarKind::Bytes.is_map_key());
    }

    #[test]
    fn field_kinds_deserialize_from_tagged_json() {
        let kind: FieldKind = serde_json::from_str(r#"{"scalar":"sfixed32"}"#).unwrap();
        assert_eq!(kind, FieldKind::Scalar(ScalarKind::Sfixed32));

        let kind: FieldKind = serde_json::from_str(r#"{"message":"im.User"}"#).unwrap();
        assert_eq!(kind, FieldKind::Message("im.User".to_string()));
    }
}
