//! Name index over every type declared by a set of files.

use crate::node::{EnumDescriptor, FileDescriptor, MessageDescriptor, Scope};
use std::collections::{BTreeMap, btree_map::Entry};

///
/// TypeRef
///

#[derive(Clone, Copy, Debug)]
pub enum TypeRef<'a> {
    Message(&'a MessageDescriptor),
    Enum(&'a EnumDescriptor),
}

impl<'a> TypeRef<'a> {
    #[must_use]
    pub fn full_name(self) -> &'a str {
        match self {
            Self::Message(m) => &m.full_name,
            Self::Enum(e) => &e.full_name,
        }
    }
}

///
/// DescriptorPool
///
/// Read-only lookup from full name to descriptor. The first definition of
/// a name wins; later duplicates are ignored.
///

#[derive(Debug, Default)]
pub struct DescriptorPool<'a> {
    types: BTreeMap<&'a str, TypeRef<'a>>,
}

impl<'a> DescriptorPool<'a> {
    #[must_use]
    pub fn new(files: &'a [FileDescriptor]) -> Self {
        let mut pool = Self::default();
        for file in files {
            pool.index_scope(file);
        }

        pool
    }

    fn index_scope<S: Scope>(&mut self, scope: &'a S) {
        for descriptor in scope.enums() {
            self.insert(TypeRef::Enum(descriptor));
        }
        for message in scope.messages() {
            self.insert(TypeRef::Message(message));
            self.index_scope(message);
        }
    }

    fn insert(&mut self, ty: TypeRef<'a>) {
        let name = ty.full_name();

        match self.types.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(ty);
            }
            Entry::Occupied(_) => {
                tracing::debug!(name, "duplicate type definition ignored");
            }
        }
    }

    #[must_use]
    pub fn get(&self, full_name: &str) -> Option<TypeRef<'a>> {
        self.types.get(full_name).copied()
    }

    #[must_use]
    pub fn message(&self, full_name: &str) -> Option<&'a MessageDescriptor> {
        match self.get(full_name)? {
            TypeRef::Message(m) => Some(m),
            TypeRef::Enum(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
