//! Precedence walk: pick the text that wins for one option.
//!
//! Operates on a chain plus the current flag state and environment, and does
//! no I/O of its own. Order, highest first:
//!
//! 1. Flag, when bound and explicitly given on the command line
//! 2. Environment variable, when bound and present (empty counts as present)
//! 3. Default text
//!
//! Conversion happens afterwards, on whichever text won.

use tracing::trace;

use crate::builder::Link;
use crate::env::EnvSource;
use crate::flags::FlagSet;
use crate::types::Source;

/// Winning text for an option and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub source: Source,
    pub text: String,
}

pub(crate) fn resolve(chain: &Link, flags: &dyn FlagSet, env: &dyn EnvSource) -> Option<Resolved> {
    let resolved = from_flag(chain, flags)
        .or_else(|| from_env(chain, env))
        .or_else(|| from_default(chain));
    trace!(
        key = chain.key(),
        source = ?resolved.as_ref().map(|r| &r.source),
        "resolved option"
    );
    resolved
}

fn from_flag(chain: &Link, flags: &dyn FlagSet) -> Option<Resolved> {
    let name = chain.flag_name()?;
    if !flags.changed(name) {
        return None;
    }
    let text = flags.string_value(name)?;
    Some(Resolved {
        source: Source::Flag(name.to_string()),
        text,
    })
}

fn from_env(chain: &Link, env: &dyn EnvSource) -> Option<Resolved> {
    let name = chain.env_name()?;
    let text = env.lookup_env(name)?;
    Some(Resolved {
        source: Source::Env(name.to_string()),
        text,
    })
}

fn from_default(chain: &Link) -> Option<Resolved> {
    chain.default_text().map(|text| Resolved {
        source: Source::Default,
        text: text.to_string(),
    })
}
