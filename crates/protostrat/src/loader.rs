//! Populates the environment from schema containers.
//!
//! Load order is not known up front: a message may reference a sibling
//! declared after it, a type nested inside a sibling, or a type from
//! another file. The loader therefore makes repeated whole passes, treating
//! the not-found condition as "retry later". Each pass over N candidates
//! either loads at least one more of them or will never make progress, so
//! N passes are enough.

use crate::{compile::Compiler, env::Environment, error::CompileError};
use protostrat_schema::{FileDescriptor, MessageDescriptor, Scope};
use std::collections::HashSet;

///
/// Loader
///

pub(crate) struct Loader<'a> {
    compiler: Compiler<'a>,
}

impl<'a> Loader<'a> {
    pub(crate) const fn new(compiler: Compiler<'a>) -> Self {
        Self { compiler }
    }

    /// Load every file into `env`, retrying files whose types only partly
    /// resolved. Makes at most one pass per file.
    pub(crate) fn load_files(
        &self,
        env: &mut Environment,
        files: &[FileDescriptor],
    ) -> Result<(), CompileError> {
        let mut loaded = vec![false; files.len()];

        for pass in 0..files.len() {
            for (file, done) in files.iter().zip(loaded.iter_mut()) {
                if *done {
                    continue;
                }
                *done = self.load_scope(env, file, 1)?;
            }

            let remaining = loaded.iter().filter(|done| !**done).count();
            tracing::debug!(pass, remaining, "file pass complete");
            if remaining == 0 {
                break;
            }
        }

        Ok(())
    }

    /// Load the enums and messages declared directly in `scope`, and
    /// recursively their nested types. Returns whether every message at
    /// this level loaded.
    pub(crate) fn load_scope<S: Scope>(
        &self,
        env: &mut Environment,
        scope: &S,
        depth: usize,
    ) -> Result<bool, CompileError> {
        let max = self.compiler.config.max_nesting_depth;
        if depth > max {
            return Err(CompileError::NestingTooDeep {
                scope: scope.scope_name().to_string(),
                max,
            });
        }

        // enums never reference anything, so they load in one go
        for descriptor in scope.enums() {
            if env.is_filled(&descriptor.full_name) {
                continue;
            }
            let generator = self.compiler.compile_enum(descriptor)?;
            env.fill(&descriptor.full_name, generator);
        }

        let messages = scope.messages();
        for message in messages {
            env.reserve(&message.full_name);
        }

        let mut loaded = HashSet::with_capacity(messages.len());
        for _ in 0..messages.len() {
            for message in messages {
                if loaded.contains(message.full_name.as_str()) {
                    continue;
                }

                match self.load_message(env, message, depth) {
                    Ok(true) => {
                        loaded.insert(message.full_name.as_str());
                    }
                    Ok(false) => {}
                    Err(CompileError::NotFound { name }) => {
                        tracing::trace!(
                            message = %message.full_name,
                            missing = %name,
                            "deferring message until its dependency loads"
                        );
                    }
                    Err(err) => return Err(err),
                }
            }

            if loaded.len() == messages.len() {
                break;
            }
        }

        Ok(loaded.len() == messages.len())
    }

    // load_message
    // nested types first, so the message body can reference them
    fn load_message(
        &self,
        env: &mut Environment,
        message: &MessageDescriptor,
        depth: usize,
    ) -> Result<bool, CompileError> {
        let nested = self.load_scope(env, message, depth + 1)?;

        if !env.is_filled(&message.full_name) {
            let compiled = self.compiler.compile_message(env, message)?;
            env.fill_with_uses(&message.full_name, compiled.generator, compiled.uses);
        }

        Ok(nested)
    }
}
