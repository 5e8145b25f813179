use std::fmt;

use crate::builder::Builder;
use crate::error::OptError;
use crate::registry::Registry;
use crate::resolve::Resolved;
use crate::types::Source;

/// A finished option, returned by [`Builder::build`].
///
/// Holds the chain it was built from and a handle to its registry. Lookups
/// are not cached: each call re-reads the flag state and the environment, so
/// the answer before [`Registry::parse`] can differ from the answer after.
pub struct Opt<T> {
    chain: Builder<T>,
    registry: Registry,
}

impl<T> Clone for Opt<T> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<T> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opt").field("chain", &self.chain).finish()
    }
}

impl<T> Opt<T> {
    pub(crate) fn new(chain: Builder<T>, registry: Registry) -> Self {
        Self { chain, registry }
    }

    pub fn key(&self) -> &str {
        self.chain.key()
    }

    /// The chain this option was built from. Extending it and building again
    /// declares a separate option.
    pub fn chain(&self) -> &Builder<T> {
        &self.chain
    }

    /// Which source would supply the value right now, if any.
    pub fn source(&self) -> Option<Source> {
        self.resolve().map(|r| r.source)
    }

    /// Resolve and convert the option's value.
    ///
    /// `Ok(None)` means no source supplied text. A conversion failure is an
    /// error; lower-precedence sources are not tried after the winning text
    /// fails to convert.
    pub fn lookup(&self) -> Result<Option<T>, OptError> {
        let Some(Resolved { source, text }) = self.resolve() else {
            return Ok(None);
        };
        let convert = self.chain.converter();
        convert(&text)
            .map(Some)
            .map_err(|reason| OptError::Conversion {
                key: self.key().to_string(),
                origin: source,
                text,
                reason,
            })
    }

    /// Like [`lookup`](Self::lookup), but a missing value is an error naming
    /// the option's flag and environment bindings. Options that can be absent
    /// should carry a default.
    pub fn must_lookup(&self) -> Result<T, OptError> {
        self.lookup()?.ok_or_else(|| OptError::MissingOption {
            key: self.key().to_string(),
            flag: self.chain.flag_name().map(str::to_string),
            env: self.chain.env_name().map(str::to_string),
        })
    }

    fn resolve(&self) -> Option<Resolved> {
        self.registry.resolve(self.chain.head())
    }
}
