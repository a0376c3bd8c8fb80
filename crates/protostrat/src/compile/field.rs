use crate::{
    Generator,
    compile::{Compiler, Uses},
    env::Environment,
    error::CompileError,
    table,
    value::{MapKey, Value},
};
use proptest::{collection, prelude::*};
use protostrat_schema::{FieldDescriptor, FieldKind, Label, MessageDescriptor};

impl Compiler<'_> {
    /// Generator for one field of `message`, honouring any override keyed
    /// by the field's full name. Every environment type the result samples
    /// through is added to `uses`.
    pub(crate) fn compile_field(
        &self,
        env: &Environment,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        uses: &mut Uses,
    ) -> Result<Generator, CompileError> {
        let full_name = message.field_full_name(&field.name);

        self.overrides
            .gate(&full_name, || self.derive_field(env, &full_name, field, uses))
    }

    fn derive_field(
        &self,
        env: &Environment,
        full_name: &str,
        field: &FieldDescriptor,
        uses: &mut Uses,
    ) -> Result<Generator, CompileError> {
        match &field.kind {
            FieldKind::Scalar(kind) => Ok(self.multiplicity.apply(field.label, table::scalar(*kind))),

            FieldKind::Enum(type_name) => {
                let generator = env.lookup(type_name)?;
                uses.insert(type_name.clone());

                Ok(self.multiplicity.apply(field.label, generator))
            }

            FieldKind::Message(type_name) => {
                let target = self
                    .pool
                    .message(type_name)
                    .ok_or_else(|| CompileError::not_found(type_name.as_str()))?;

                if target.options.deprecated {
                    return Ok(table::absent());
                }
                if target.options.map_entry {
                    return self.compile_map(env, target, uses);
                }

                let generator = env.lookup(type_name)?;
                uses.insert(type_name.clone());

                Ok(self.multiplicity.apply(field.label, generator))
            }

            FieldKind::Group(_) => Err(CompileError::UnsupportedKind {
                field: full_name.to_string(),
                kind: field.kind.to_string(),
            }),
        }
    }

    // compile_map
    // entries whose key or value came out absent are dropped rather than
    // rejected, so a value that bottoms out on recursion never stalls the
    // sample
    fn compile_map(
        &self,
        env: &Environment,
        entry: &MessageDescriptor,
        uses: &mut Uses,
    ) -> Result<Generator, CompileError> {
        let [key, value] = entry.fields.as_slice() else {
            return Err(CompileError::MalformedMapEntry {
                name: entry.full_name.clone(),
                found: entry.fields.len(),
            });
        };
        if !matches!(key.kind, FieldKind::Scalar(kind) if kind.is_map_key()) {
            return Err(CompileError::UnsupportedKind {
                field: entry.field_full_name(&key.name),
                kind: key.kind.to_string(),
            });
        }

        let keys = self.compile_entry_part(env, entry, key, uses)?;
        let values = self.compile_entry_part(env, entry, value, uses)?;

        let entries = collection::vec((keys, values), 0..=self.config.max_map_entries)
            .prop_map(|pairs| {
                Value::Map(
                    pairs
                        .into_iter()
                        .filter(|(_, value)| !value.is_absent())
                        .filter_map(|(key, value)| Some((MapKey::try_from(key).ok()?, value)))
                        .collect(),
                )
            })
            .boxed();

        Ok(self.multiplicity.map(entries))
    }

    // keys and values always carry a value, whatever the entry declares
    fn compile_entry_part(
        &self,
        env: &Environment,
        entry: &MessageDescriptor,
        field: &FieldDescriptor,
        uses: &mut Uses,
    ) -> Result<Generator, CompileError> {
        let full_name = entry.field_full_name(&field.name);
        let required = FieldDescriptor {
            label: Label::Required,
            ..field.clone()
        };

        self.overrides
            .gate(&full_name, || self.derive_field(env, &full_name, &required, uses))
    }
}
