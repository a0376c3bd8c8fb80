//! Derive proptest strategies from protobuf-style schema descriptors.
//!
//! ## Crate layout
//! - `compile`: field and message compilers.
//! - `config`: compilation tunables, loadable from TOML.
//! - `env`: the environment of compiled generators and its type handles.
//! - `loader`: multi-pass population of the environment.
//! - `overrides`: caller substitutions by fully-qualified name.
//! - `table`: scalar and multiplicity tables.
//! - `value`: the sampled value model.
//!
//! ```ignore
//! let env = protostrat::compile(&files, &Overrides::new())?;
//! let user = env.generator("im.User").expect("compiled");
//! ```

mod compile;
pub mod config;
pub mod env;
pub mod error;
mod loader;
pub mod overrides;
pub mod table;
pub mod value;

pub use config::Config;
pub use env::Environment;
pub use error::{CompileError, ConfigError, Error};
pub use overrides::{Override, Overrides};
pub use value::{MapKey, Message, Value};

// re-exports
pub use protostrat_schema as schema;

use crate::{compile::Compiler, env::RecursionGuard, loader::Loader};
use proptest::strategy::BoxedStrategy;
use protostrat_schema::{DescriptorPool, FileDescriptor};

/// A compiled generator of sampled values.
pub type Generator = BoxedStrategy<Value>;

/// Compile every message and enum declared by `files` with the default
/// [`Config`].
pub fn compile(files: &[FileDescriptor], overrides: &Overrides) -> Result<Environment, CompileError> {
    compile_with(files, overrides, &Config::default())
}

/// Compile every message and enum declared by `files`.
///
/// Files may reference each other's types in any order. Types that still
/// cannot be resolved after every pass, and types that reference them, are
/// left out of the returned environment and listed by
/// [`Environment::unresolved`]; call
/// [`Environment::ensure_resolved`] to treat them as an error.
pub fn compile_with(
    files: &[FileDescriptor],
    overrides: &Overrides,
    config: &Config,
) -> Result<Environment, CompileError> {
    let pool = DescriptorPool::new(files);
    let guard = RecursionGuard::new(config.max_recursion_depth);
    let mut env = Environment::new(guard.clone());

    let loader = Loader::new(Compiler::new(&pool, overrides, config, guard));
    loader.load_files(&mut env, files)?;
    env.settle();

    let unresolved = env.unresolved();
    if !unresolved.is_empty() {
        tracing::warn!(?unresolved, "some types could not be resolved");
    }
    tracing::debug!(types = env.len(), "compilation complete");

    Ok(env)
}
