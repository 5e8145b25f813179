//! Option registry and the parse lifecycle.
//!
//! A [`Registry`] is an explicit context value: options register into it when
//! built, and [`Registry::parse`] drives them through two phases around the
//! flag library's own parse:
//!
//! 1. before-parse: every flag link of every option registers its flag, in
//!    declaration order
//! 2. the flag library consumes the arguments
//! 3. after-parse: per-option hook, currently only traced
//!
//! All registrations finish before any argument is parsed, so a flag declared
//! last is as recognizable as one declared first.

use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use crate::builder::{FlagFacet, Link};
use crate::env::{EnvSource, ProcessEnv};
use crate::error::OptError;
use crate::flags::FlagSet;
use crate::ops::{Listing, OptionReport};
use crate::resolve::{self, Resolved};

#[derive(Default)]
struct State {
    options: Vec<Arc<Link>>,
    /// Flags were handed to the flag library; set by the first parse attempt.
    registered: bool,
    parsed: bool,
}

struct Inner {
    /// Guards appends and the lifecycle pass together.
    state: Mutex<State>,
    flags: RwLock<Box<dyn FlagSet>>,
    env: Box<dyn EnvSource>,
}

/// Ordered, append-only set of built options plus the flag library and
/// environment they resolve against.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Registry")
            .field("options", &state.options.len())
            .field("parsed", &state.parsed)
            .finish()
    }
}

impl Registry {
    pub fn new(flags: impl FlagSet + 'static, env: impl EnvSource + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                flags: RwLock::new(Box::new(flags)),
                env: Box::new(env),
            }),
        }
    }

    /// Registry over a clap command and the process environment.
    #[cfg(feature = "clap")]
    pub fn with_command(command: clap::Command) -> Self {
        Self::new(crate::cli::ClapFlags::new(command), ProcessEnv)
    }

    /// Registry over any flag library and the process environment.
    pub fn with_flags(flags: impl FlagSet + 'static) -> Self {
        Self::new(flags, ProcessEnv)
    }

    pub(crate) fn register(&self, chain: Arc<Link>) {
        let mut state = self.inner.state.lock();
        if state.registered {
            warn!(
                key = chain.key(),
                "option declared after parse; its flag will not be registered"
            );
        }
        trace!(key = chain.key(), index = state.options.len(), "option registered");
        state.options.push(chain);
    }

    pub(crate) fn resolve(&self, chain: &Link) -> Option<Resolved> {
        let flags = self.inner.flags.read();
        resolve::resolve(chain, &**flags, &*self.inner.env)
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`parse`](Self::parse) has run.
    pub fn is_parsed(&self) -> bool {
        self.inner.state.lock().parsed
    }

    /// Run the lifecycle against the process arguments.
    ///
    /// Call once, after every option is built and before any value is
    /// needed from a flag.
    pub fn parse(&self) -> Result<(), OptError> {
        self.parse_from(std::env::args_os())
    }

    /// Run the lifecycle against `args`, program name first.
    ///
    /// Flags are registered by the first call only. When the flag library
    /// rejects the arguments, the registry stays unparsed and a later call
    /// parses again against the same flags.
    pub fn parse_from<I, A>(&self, args: I) -> Result<(), OptError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let mut state = self.inner.state.lock();
        if state.parsed {
            return Err(OptError::AlreadyParsed);
        }

        let mut flags = self.inner.flags.write();
        if !state.registered {
            state.registered = true;
            debug!(options = state.options.len(), "before parse: registering flags");
            for chain in &state.options {
                before_parse(chain, chain, &mut **flags);
            }
        }

        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        debug!(args = args.len(), "parsing arguments");
        flags.parse_args(args)?;
        drop(flags);
        state.parsed = true;

        for chain in &state.options {
            after_parse(chain);
        }
        debug!("after parse: done");
        Ok(())
    }

    /// Every registered option with its bindings and current winning source,
    /// in declaration order.
    pub fn report(&self) -> Listing {
        let state = self.inner.state.lock();
        let entries = state
            .options
            .iter()
            .map(|chain| {
                let resolved = self.resolve(chain);
                OptionReport::new(chain, resolved)
            })
            .collect();
        Listing { entries }
    }
}

/// Register the flag of every flag link from the root up to `link`. `head`
/// is the option's full chain; default and usage come from there, so facets
/// declared after the flag still reach its help text.
fn before_parse(link: &Link, head: &Link, flags: &mut dyn FlagSet) {
    if let Some(up) = link.up() {
        before_parse(up, head, flags);
    }
    if let Link::Flag { facet, .. } = link {
        register_flag(facet, head, flags);
    }
}

fn register_flag(facet: &FlagFacet, head: &Link, flags: &mut dyn FlagSet) {
    if facet.name.is_empty() {
        return;
    }
    let name = facet.name.as_str();
    let default = head.default_text().unwrap_or_default();
    let usage = head.usage_text().unwrap_or_default();
    debug!(key = head.key(), flag = name, "registering flag");
    flags.register_string_flag(name, facet.shorthand, default, usage);
    if facet.dir {
        flags.mark_directory(name);
    }
    if facet.file {
        flags.mark_file(name);
    }
    if facet.required {
        flags.mark_required(name);
    }
    if facet.persistent {
        flags.mark_persistent(name);
    }
    if head.is_switch() {
        flags.mark_switch(name);
    }
}

fn after_parse(chain: &Link) {
    trace!(key = chain.key(), "after parse");
}
