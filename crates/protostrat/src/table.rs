//! Fixed mappings from scalar kind to base generator and from label to
//! multiplicity combinator.

use crate::{Generator, config::Config, env::RecursionGuard, value::Value};
use proptest::{
    collection,
    prelude::*,
    strategy::{NewTree, ValueTree},
    test_runner::TestRunner,
};
use protostrat_schema::{Label, ScalarKind};
use std::collections::BTreeMap;

///
/// CONSTANTS
///

/// Signed 32-bit kinds sample `[-(2^31 - 1), 2^31 - 1]`.
pub const RANGE32: std::ops::RangeInclusive<i32> = -i32::MAX..=i32::MAX;

/// Signed 64-bit kinds sample `[-(2^63 - 1), 2^63 - 1]`.
pub const RANGE64: std::ops::RangeInclusive<i64> = -i64::MAX..=i64::MAX;

/// Largest single-precision magnitude, `(2 - 2^-23) * 2^127`.
pub const SINGLE_PRECISION_MAX: f32 = f32::MAX;

/// Base generator for one scalar kind.
#[must_use]
pub fn scalar(kind: ScalarKind) -> Generator {
    match kind {
        ScalarKind::Double => (prop::num::f64::ANY
            | prop::num::f64::INFINITE
            | prop::num::f64::QUIET_NAN)
            .prop_map(Value::Float64)
            .boxed(),
        // finite classes only, so samples stay within +/- SINGLE_PRECISION_MAX
        ScalarKind::Float => prop::num::f32::ANY.prop_map(Value::Float32).boxed(),
        ScalarKind::Int32 | ScalarKind::Sint32 | ScalarKind::Sfixed32 => {
            RANGE32.prop_map(Value::Int32).boxed()
        }
        ScalarKind::Int64 | ScalarKind::Sint64 | ScalarKind::Sfixed64 => {
            RANGE64.prop_map(Value::Int64).boxed()
        }
        ScalarKind::Uint32 | ScalarKind::Fixed32 => any::<u32>().prop_map(Value::Uint32).boxed(),
        ScalarKind::Uint64 | ScalarKind::Fixed64 => any::<u64>().prop_map(Value::Uint64).boxed(),
        ScalarKind::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        ScalarKind::String => any::<String>().prop_map(Value::Text).boxed(),
        ScalarKind::Bytes => any::<Vec<u8>>().prop_map(Value::Bytes).boxed(),
    }
}

///
/// Multiplicity
///
/// Applies a field's label to its base generator.
///

#[derive(Clone, Debug)]
pub(crate) struct Multiplicity {
    max_repeated: usize,
    guard: RecursionGuard,
}

impl Multiplicity {
    pub(crate) fn new(config: &Config, guard: RecursionGuard) -> Self {
        Self {
            max_repeated: config.max_repeated,
            guard,
        }
    }

    pub(crate) fn apply(&self, label: Label, generator: Generator) -> Generator {
        match label {
            Label::Optional => self.optional(generator),
            Label::Repeated => self.repeated(generator),
            Label::Required => generator,
        }
    }

    pub(crate) fn optional(&self, generator: Generator) -> Generator {
        OrElse {
            inner: prop_oneof![Just(Value::Absent), generator].boxed(),
            fallback: Value::Absent,
            guard: self.guard.clone(),
        }
        .boxed()
    }

    // map
    // an empty map is always a valid fallback
    pub(crate) fn map(&self, entries: Generator) -> Generator {
        OrElse {
            inner: entries,
            fallback: Value::Map(BTreeMap::new()),
            guard: self.guard.clone(),
        }
        .boxed()
    }

    pub(crate) fn repeated(&self, generator: Generator) -> Generator {
        OrElse {
            inner: collection::vec(generator, 0..=self.max_repeated)
                .prop_map(Value::List)
                .boxed(),
            fallback: Value::List(Vec::new()),
            guard: self.guard.clone(),
        }
        .boxed()
    }
}

/// Generator that only ever yields the absence sentinel.
#[must_use]
pub fn absent() -> Generator {
    Just(Value::Absent).boxed()
}

///
/// OrElse
///
/// Yields `fallback` when `inner` is rejected for reaching the recursion
/// limit. Any other rejection is passed through.
///

#[derive(Debug)]
struct OrElse {
    inner: Generator,
    fallback: Value,
    guard: RecursionGuard,
}

impl Strategy for OrElse {
    type Tree = Box<dyn ValueTree<Value = Value>>;
    type Value = Value;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        self.guard.reset();

        match self.inner.new_tree(runner) {
            Ok(tree) => Ok(tree),
            Err(_) if self.guard.take() => Ok(Box::new(Just(self.fallback.clone()))),
            Err(reason) => Err(reason),
        }
    }
}
