//! Read-only protobuf-style schema descriptors.
//!
//! A [`FileDescriptor`](node::FileDescriptor) is one schema container: the
//! messages and enums a single `.proto` file would declare. Descriptors are
//! plain data, built in code or loaded from JSON, and are never validated.

pub mod error;
pub mod node;
pub mod pool;
pub mod types;

pub use error::SchemaError;
pub use node::{
    EnumDescriptor, EnumValue, FieldDescriptor, FileDescriptor, MessageDescriptor,
    MessageOptions, Scope, load_descriptor_set,
};
pub use pool::{DescriptorPool, TypeRef};
pub use types::{FieldKind, Label, ScalarKind};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::SchemaError,
        node::*,
        types::{FieldKind, Label, ScalarKind},
    };
    pub use serde::{Deserialize, Serialize};
    pub(crate) use thiserror::Error as ThisError;
}
