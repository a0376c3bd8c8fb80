//! The environment maps type full names to compiled generators.
//!
//! Entries are created in two phases. `reserve` registers a [`TypeHandle`]
//! before the type's body is compiled, so self- and mutually-recursive
//! references resolve to the handle; `fill` later sets the body exactly
//! once. A handle only does work when it is sampled, by which point the
//! body it points at has been filled.

use crate::{
    Generator,
    error::{CompileError, Error},
    value::Value,
};
use proptest::{
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::{Reason, TestRunner},
};
use std::{
    cell::{Cell, OnceCell},
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

///
/// RecursionGuard
///
/// Shared by every handle of one environment. Records that a sample was
/// rejected for hitting the recursion limit so the nearest optional or
/// repeated combinator can substitute absence instead of failing.
///

#[derive(Clone, Debug)]
pub(crate) struct RecursionGuard {
    limit: usize,
    tripped: Rc<Cell<bool>>,
}

impl RecursionGuard {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            tripped: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn reset(&self) {
        self.tripped.set(false);
    }

    // take
    // true once per trip
    pub(crate) fn take(&self) -> bool {
        self.tripped.replace(false)
    }

    fn trip(&self) {
        self.tripped.set(true);
    }
}

///
/// TypeHandle
///

#[derive(Clone)]
pub struct TypeHandle {
    name: Rc<str>,
    body: Rc<OnceCell<Generator>>,
    active: Rc<Cell<usize>>,
    guard: RecursionGuard,
}

impl TypeHandle {
    fn new(name: &str, guard: RecursionGuard) -> Self {
        Self {
            name: name.into(),
            body: Rc::new(OnceCell::new()),
            active: Rc::new(Cell::new(0)),
            guard,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.body.get().is_some()
    }

    fn fill(&self, generator: Generator) -> bool {
        self.body.set(generator).is_ok()
    }
}

impl fmt::Debug for TypeHandle {
    // the body may point back at this handle
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("name", &self.name)
            .field("filled", &self.is_filled())
            .finish_non_exhaustive()
    }
}

impl Strategy for TypeHandle {
    type Tree = Box<dyn ValueTree<Value = Value>>;
    type Value = Value;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let Some(body) = self.body.get() else {
            return Err(Reason::from(format!(
                "type '{}' was never resolved",
                self.name
            )));
        };

        if self.active.get() >= self.guard.limit {
            self.guard.trip();
            return Err(Reason::from(format!(
                "recursion limit reached for '{}'",
                self.name
            )));
        }

        self.active.set(self.active.get() + 1);
        let tree = body.new_tree(runner);
        self.active.set(self.active.get() - 1);

        tree
    }
}

///
/// Environment
///
/// A filled type only samples if every type it samples through does too.
/// `uses` records those edges; `broken` is the settled set of filled types
/// that can reach an unfilled handle.
///

#[derive(Debug)]
pub struct Environment {
    entries: BTreeMap<String, TypeHandle>,
    uses: BTreeMap<String, BTreeSet<String>>,
    broken: BTreeSet<String>,
    guard: RecursionGuard,
}

impl Environment {
    pub(crate) fn new(guard: RecursionGuard) -> Self {
        Self {
            entries: BTreeMap::new(),
            uses: BTreeMap::new(),
            broken: BTreeSet::new(),
            guard,
        }
    }

    /// Register a handle for `name`, returning the existing one if any.
    pub(crate) fn reserve(&mut self, name: &str) -> TypeHandle {
        if let Some(handle) = self.entries.get(name) {
            return handle.clone();
        }

        let handle = TypeHandle::new(name, self.guard.clone());
        self.entries.insert(name.to_string(), handle.clone());

        handle
    }

    /// Set the body of `name`. Entries are write-once: returns false and
    /// keeps the original if the body was already set.
    pub(crate) fn fill(&mut self, name: &str, generator: Generator) -> bool {
        self.reserve(name).fill(generator)
    }

    /// Like [`fill`](Self::fill), also recording the types the body
    /// samples through.
    pub(crate) fn fill_with_uses(
        &mut self,
        name: &str,
        generator: Generator,
        uses: BTreeSet<String>,
    ) -> bool {
        let filled = self.fill(name, generator);
        if filled {
            self.uses.insert(name.to_string(), uses);
        }

        filled
    }

    /// Mark every filled type that depends, directly or transitively, on
    /// a handle that was never filled. Called once loading is over.
    pub(crate) fn settle(&mut self) {
        let mut broken: BTreeSet<String> = self
            .entries
            .iter()
            .filter(|(_, handle)| !handle.is_filled())
            .map(|(name, _)| name.clone())
            .collect();

        loop {
            let reached: Vec<String> = self
                .uses
                .iter()
                .filter(|(name, uses)| {
                    !broken.contains(name.as_str()) && uses.iter().any(|u| broken.contains(u))
                })
                .map(|(name, _)| name.clone())
                .collect();
            if reached.is_empty() {
                break;
            }
            broken.extend(reached);
        }

        self.broken = broken;
    }

    /// Generator for a referenced type, or the not-found condition when no
    /// handle has been reserved for it yet.
    pub(crate) fn lookup(&self, name: &str) -> Result<Generator, CompileError> {
        self.entries
            .get(name)
            .map(|handle| handle.clone().boxed())
            .ok_or_else(|| CompileError::not_found(name))
    }

    #[must_use]
    pub fn is_filled(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(TypeHandle::is_filled)
    }

    fn is_resolved(&self, name: &str, handle: &TypeHandle) -> bool {
        handle.is_filled() && !self.broken.contains(name)
    }

    /// Generator for a successfully compiled type.
    #[must_use]
    pub fn generator(&self, name: &str) -> Option<Generator> {
        self.entries
            .get(name)
            .filter(|handle| self.is_resolved(name, handle))
            .map(|handle| handle.clone().boxed())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|handle| self.is_resolved(name, handle))
    }

    /// Number of compiled types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compiled types in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Generator)> + '_ {
        self.entries
            .iter()
            .filter(|(name, handle)| self.is_resolved(name, handle))
            .map(|(name, handle)| (name.as_str(), handle.clone().boxed()))
    }

    /// Types that were reserved but never compiled, and compiled types that
    /// sample through one of those.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, handle)| !self.is_resolved(name, handle))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Fail if any type was left unresolved.
    pub fn ensure_resolved(self) -> Result<Self, CompileError> {
        let names: Vec<String> = self.unresolved().into_iter().map(String::from).collect();
        if names.is_empty() {
            Ok(self)
        } else {
            Err(CompileError::Unresolved { names })
        }
    }

    /// Draw one value of `name`.
    pub fn example(&self, name: &str, runner: &mut TestRunner) -> Result<Value, Error> {
        let generator = self
            .generator(name)
            .ok_or_else(|| CompileError::not_found(name))?;
        let tree = generator.new_tree(runner).map_err(|reason| Error::Sample {
            name: name.to_string(),
            reason: reason.to_string(),
        })?;

        Ok(tree.current())
    }
}
