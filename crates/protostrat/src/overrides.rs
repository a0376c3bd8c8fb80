use crate::{Generator, error::CompileError, value::Value};
use proptest::strategy::Strategy;
use std::{collections::HashMap, fmt, rc::Rc};

///
/// Override
///
/// `Replace` stands in for the derived generator without deriving it;
/// `Transform` receives the derived generator and returns its substitute.
///

#[derive(Clone)]
pub enum Override {
    Replace(Generator),
    Transform(Rc<dyn Fn(Generator) -> Generator>),
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(generator) => f.debug_tuple("Replace").field(generator).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

///
/// Overrides
///
/// Caller-supplied substitutions keyed by the fully-qualified name of a
/// field (`pkg.Message.field`) or a type (`pkg.Enum`, `pkg.Message`).
///

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    entries: HashMap<String, Override>,
}

impl Overrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn replace<S>(mut self, name: impl Into<String>, strategy: S) -> Self
    where
        S: Strategy<Value = Value> + 'static,
    {
        self.entries
            .insert(name.into(), Override::Replace(strategy.boxed()));
        self
    }

    #[must_use]
    pub fn transform<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Generator) -> Generator + 'static,
    {
        self.entries
            .insert(name.into(), Override::Transform(Rc::new(f)));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Override> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `compile` for `name` unless an override applies. A `Replace`
    /// override skips `compile` entirely, including any lookups it would
    /// have made.
    pub(crate) fn gate<F>(&self, name: &str, compile: F) -> Result<Generator, CompileError>
    where
        F: FnOnce() -> Result<Generator, CompileError>,
    {
        match self.entries.get(name) {
            None => compile(),
            Some(Override::Replace(generator)) => Ok(generator.clone()),
            Some(Override::Transform(f)) => Ok(f(compile()?)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Override)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, Override)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
