use crate::{
    compile::{CompiledMessage, Compiler, Uses},
    env::Environment,
    error::CompileError,
    value::{Message, Value},
};
use proptest::prelude::*;
use protostrat_schema::MessageDescriptor;

impl Compiler<'_> {
    /// Generator building whole instances of `message` from one generator
    /// per declared field.
    ///
    /// References to other messages, including `message` itself, compile to
    /// environment handles, so nothing here recurses into another message's
    /// body.
    pub(crate) fn compile_message(
        &self,
        env: &Environment,
        message: &MessageDescriptor,
    ) -> Result<CompiledMessage, CompileError> {
        let mut uses = Uses::new();

        let generator = self.overrides.gate(&message.full_name, || {
            let mut names = Vec::with_capacity(message.fields.len());
            let mut generators = Vec::with_capacity(message.fields.len());
            for field in &message.fields {
                names.push(field.name.clone());
                generators.push(self.compile_field(env, message, field, &mut uses)?);
            }

            let type_name = message.full_name.clone();

            Ok(generators
                .prop_map(move |values| {
                    Value::Message(Message::build(
                        type_name.as_str(),
                        names.iter().cloned().zip(values),
                    ))
                })
                .boxed())
        })?;

        Ok(CompiledMessage { generator, uses })
    }
}
