use std::collections::BTreeMap;

///
/// Value
///
/// One sampled field value. `Absent` is the "optional, not present"
/// sentinel; it never survives into a built [`Message`].
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
    Bytes(Vec<u8>),
    Enum(i32),
    List(Vec<Self>),
    Map(BTreeMap<MapKey, Self>),
    Message(Message),
    Absent,
}

impl Value {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<MapKey, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Widen any integer variant to `i128` so range checks can be uniform.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::Int32(v) | Self::Enum(v) => Some(v.into()),
            Self::Int64(v) => Some(v.into()),
            Self::Uint32(v) => Some(v.into()),
            Self::Uint64(v) => Some(v.into()),
            _ => None,
        }
    }
}

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<MapKey> for Value {
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::Bool(v) => Self::Bool(v),
            MapKey::Int32(v) => Self::Int32(v),
            MapKey::Int64(v) => Self::Int64(v),
            MapKey::Uint32(v) => Self::Uint32(v),
            MapKey::Uint64(v) => Self::Uint64(v),
            MapKey::Text(v) => Self::Text(v),
        }
    }
}

///
/// MapKey
///
/// The scalar values a map field may be keyed by.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MapKey {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Text(String),
}

impl TryFrom<Value> for MapKey {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(v) => Ok(Self::Bool(v)),
            Value::Int32(v) => Ok(Self::Int32(v)),
            Value::Int64(v) => Ok(Self::Int64(v)),
            Value::Uint32(v) => Ok(Self::Uint32(v)),
            Value::Uint64(v) => Ok(Self::Uint64(v)),
            Value::Text(v) => Ok(Self::Text(v)),
            other => Err(other),
        }
    }
}

///
/// Message
///
/// A built message instance. Fields are keyed by name; unset optional
/// fields are missing rather than stored as `Absent`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub type_name: String,
    pub fields: BTreeMap<String, Value>,
}

impl Message {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Build from name/value pairs, dropping absent values.
    pub fn build<I>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .filter(|(_, value)| !value.is_absent())
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Follow a dotted path of message-typed fields.
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_message()?.get(part)?;
        }

        Some(current)
    }
}
