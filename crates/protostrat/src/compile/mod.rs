mod field;
mod message;

use crate::{
    Generator,
    config::Config,
    env::RecursionGuard,
    error::CompileError,
    overrides::Overrides,
    table::Multiplicity,
    value::Value,
};
use proptest::{prelude::*, sample};
use protostrat_schema::{DescriptorPool, EnumDescriptor};
use std::collections::BTreeSet;

/// Full names of the environment types a compiled generator samples
/// through.
pub(crate) type Uses = BTreeSet<String>;

///
/// CompiledMessage
///

pub(crate) struct CompiledMessage {
    pub(crate) generator: Generator,
    pub(crate) uses: Uses,
}

///
/// Compiler
///
/// Read-only context for one top-level compilation, passed explicitly
/// through every field and message compile.
///

pub(crate) struct Compiler<'a> {
    pub(crate) pool: &'a DescriptorPool<'a>,
    pub(crate) overrides: &'a Overrides,
    pub(crate) config: &'a Config,
    pub(crate) multiplicity: Multiplicity,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(
        pool: &'a DescriptorPool<'a>,
        overrides: &'a Overrides,
        config: &'a Config,
        guard: RecursionGuard,
    ) -> Self {
        Self {
            pool,
            overrides,
            config,
            multiplicity: Multiplicity::new(config, guard),
        }
    }

    /// Generator sampling one of the enum's declared numbers.
    pub(crate) fn compile_enum(&self, descriptor: &EnumDescriptor) -> Result<Generator, CompileError> {
        self.overrides.gate(&descriptor.full_name, || {
            let numbers = descriptor.numbers();
            if numbers.is_empty() {
                return Err(CompileError::EmptyEnum {
                    name: descriptor.full_name.clone(),
                });
            }

            Ok(sample::select(numbers).prop_map(Value::Enum).boxed())
        })
    }
}

#[cfg(test)]
mod tests;
