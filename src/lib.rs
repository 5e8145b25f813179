//! One declaration per command-line option: flag, environment variable and
//! default, resolved under a fixed precedence.
//!
//! ```ignore
//! let registry = Registry::with_command(clap::Command::new("myapp"));
//!
//! let retries = optchain::int("retries")
//!     .flag_p("retries", 'r', &[])
//!     .env("MYAPP_RETRIES")
//!     .default("3")
//!     .usage("How many times to retry")
//!     .build(&registry)?;
//!
//! registry.parse()?;
//! let retries: i64 = retries.must_lookup()?;
//! ```
//!
//! # Why optchain
//!
//! A CLI option usually wants three sources: a flag, an environment variable
//! for scripts and containers, and a compiled default. Wiring each by hand
//! means declaring the flag, reading the variable, parsing both, and picking
//! a winner, and the plumbing is repeated for every option. Here the option
//! is declared once and every source hangs off that declaration.
//!
//! # Precedence
//!
//! ```text
//! Default               .default("3")
//!        ↑ overridden by
//! Environment variable  .env("MYAPP_RETRIES")
//!        ↑ overridden by
//! Flag                  .flag("retries", ..), only when given explicitly
//! ```
//!
//! Every source is optional. An option without a flag never touches the flag
//! library; an option without an env binding never reads the environment. A
//! flag whose value came from its own default does not count as given, so the
//! environment still wins over it.
//!
//! The winning text is converted once, by the converter fixed when the chain
//! was started ([`text`], [`boolean`], [`int`], [`Builder::new`] or
//! [`Builder::with_converter`]). Conversion does not depend on the source: the
//! same text yields the same value from a flag, a variable, or a default. If
//! the winning text does not convert, lookup fails; it does not fall back to
//! a lower source.
//!
//! # Chains are values
//!
//! Each builder call returns a new [`Builder`] that points at the one it
//! extends. Nothing is mutated, so a partial chain can be shared and branched:
//!
//! ```ignore
//! let base = optchain::text("endpoint").env("ENDPOINT");
//! let primary = base.default("https://a.example").build(&registry)?;
//! let backup = base.default("https://b.example").build(&registry)?;
//! ```
//!
//! Setting a facet twice shadows the earlier value. An empty flag or env
//! name disables that source. The environment name is always the literal
//! string given; [`Builder::env_from_key`] is the opt-in shortcut that derives
//! it from the key.
//!
//! # Lifecycle
//!
//! Options register with a [`Registry`] when built. [`Registry::parse`] then:
//!
//! 1. registers every option's flag with the flag library, in declaration
//!    order, before any argument is read
//! 2. lets the flag library parse the arguments
//! 3. runs the after-parse hook for every option
//!
//! Lookups are not cached. Before parse, flags count as not given and values
//! come from the environment or defaults; after parse, the same call sees the
//! flags.
//!
//! # Core library, optional clap adapter
//!
//! The core talks to the flag library through the [`FlagSet`] trait and to
//! the environment through [`EnvSource`]. With the `clap` Cargo feature (on by
//! default), [`ClapFlags`] implements `FlagSet` over a `clap::Command`:
//! directory and file annotations become value hints for shell completion,
//! required flags are enforced by clap, and persistent flags are global to
//! subcommands.
//!
//! # Error handling
//!
//! Fallible operations return [`OptError`]. Messages name the option's key
//! and, where relevant, its flag and environment variable. Nothing is retried:
//! a misconfigured chain fails at [`Builder::build`], a bad value fails at
//! lookup, and [`Opt::must_lookup`] fails when no source has a value.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod convert;
mod env;
mod flags;
mod opt;
mod ops;
mod registry;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use builder::{Builder, boolean, int, text};
#[cfg(feature = "clap")]
pub use cli::ClapFlags;
pub use convert::{Converter, OptValue, parse_bool, parse_int};
pub use env::{EnvSource, ProcessEnv};
pub use error::OptError;
pub use flags::FlagSet;
pub use opt::Opt;
pub use ops::{Listing, OptionReport};
pub use registry::Registry;
pub use types::{FlagOpt, Source};
