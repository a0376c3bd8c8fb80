mod r#enum;
mod field;
mod file;
mod message;

pub use r#enum::*;
pub use field::*;
pub use file::*;
pub use message::*;

///
/// Scope
///
/// Anything that declares nested message and enum types: a file at the top
/// level, or a message for its own nested types.
///

pub trait Scope {
    /// Name used when reporting errors about this scope.
    fn scope_name(&self) -> &str;

    fn messages(&self) -> &[MessageDescriptor];

    fn enums(&self) -> &[EnumDescriptor];
}

impl Scope for FileDescriptor {
    fn scope_name(&self) -> &str {
        &self.name
    }

    fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }
}

impl Scope for MessageDescriptor {
    fn scope_name(&self) -> &str {
        &self.full_name
    }

    fn messages(&self) -> &[MessageDescriptor] {
        &self.nested_messages
    }

    fn enums(&self) -> &[EnumDescriptor] {
        &self.nested_enums
    }
}
