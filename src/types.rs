use std::fmt;

use serde::Serialize;

/// Annotation applied to a flag facet when it is declared.
///
/// Annotations are flags on the facet, so passing one twice is the same as
/// passing it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOpt {
    /// The value names a directory. Only a shell-completion hint; the caller
    /// still validates the value.
    Dir,
    /// The value names a file. Only a shell-completion hint.
    File,
    /// The flag must be given on the command line.
    Required,
    /// The flag is inherited by subcommands.
    Persistent,
}

/// The source that supplied an option's winning text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Source {
    /// An explicitly given command-line flag.
    Flag(String),
    /// A present environment variable.
    Env(String),
    /// The option's static default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag(name) => write!(f, "flag --{name}"),
            Source::Env(name) => write!(f, "env {name}"),
            Source::Default => write!(f, "default"),
        }
    }
}
