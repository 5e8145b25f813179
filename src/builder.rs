use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::convert::{Converter, OptValue};
use crate::env::env_name_for_key;
use crate::error::OptError;
use crate::opt::Opt;
use crate::registry::Registry;
use crate::types::FlagOpt;

/// Flag binding carried by a [`Link::Flag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FlagFacet {
    pub name: String,
    pub shorthand: Option<char>,
    pub dir: bool,
    pub file: bool,
    pub required: bool,
    pub persistent: bool,
}

impl FlagFacet {
    fn new(name: &str, shorthand: Option<char>, opts: &[FlagOpt]) -> Self {
        let mut facet = FlagFacet {
            name: name.to_string(),
            shorthand,
            ..FlagFacet::default()
        };
        for opt in opts {
            match opt {
                FlagOpt::Dir => facet.dir = true,
                FlagOpt::File => facet.file = true,
                FlagOpt::Required => facet.required = true,
                FlagOpt::Persistent => facet.persistent = true,
            }
        }
        facet
    }

    fn has_annotations(&self) -> bool {
        self.dir || self.file || self.required || self.persistent
    }
}

/// One link of a descriptor chain. Every non-root link points at the chain
/// it extends; links are never mutated once allocated.
#[derive(Debug)]
pub(crate) enum Link {
    Root { key: String, switch: bool },
    Flag { facet: FlagFacet, up: Arc<Link> },
    Env { name: String, up: Arc<Link> },
    Default { text: String, up: Arc<Link> },
    Usage { text: String, up: Arc<Link> },
}

impl Link {
    pub(crate) fn up(&self) -> Option<&Link> {
        match self {
            Link::Root { .. } => None,
            Link::Flag { up, .. }
            | Link::Env { up, .. }
            | Link::Default { up, .. }
            | Link::Usage { up, .. } => Some(up.as_ref()),
        }
    }

    /// This link and its predecessors, most specific first.
    pub(crate) fn walk(&self) -> impl Iterator<Item = &Link> {
        iter::successors(Some(self), |link| link.up())
    }

    pub(crate) fn key(&self) -> &str {
        self.walk()
            .find_map(|link| match link {
                Link::Root { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Whether the option's flag may be given without a value.
    pub(crate) fn is_switch(&self) -> bool {
        self.walk()
            .any(|link| matches!(link, Link::Root { switch: true, .. }))
    }

    /// The active flag facet, including a disabled (empty-named) one.
    pub(crate) fn flag(&self) -> Option<&FlagFacet> {
        self.walk().find_map(|link| match link {
            Link::Flag { facet, .. } => Some(facet),
            _ => None,
        })
    }

    /// The active flag name, `None` when unbound or disabled.
    pub(crate) fn flag_name(&self) -> Option<&str> {
        self.flag()
            .map(|facet| facet.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// The active environment name, `None` when unbound or disabled.
    pub(crate) fn env_name(&self) -> Option<&str> {
        self.walk()
            .find_map(|link| match link {
                Link::Env { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .filter(|name| !name.is_empty())
    }

    pub(crate) fn default_text(&self) -> Option<&str> {
        self.walk().find_map(|link| match link {
            Link::Default { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn usage_text(&self) -> Option<&str> {
        self.walk().find_map(|link| match link {
            Link::Usage { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check every link, shadowed ones included, since each flag link
    /// registers on its own.
    fn validate(&self) -> Result<(), OptError> {
        let key = self.key();
        if key.is_empty() {
            return Err(OptError::EmptyKey);
        }
        for link in self.walk() {
            let Link::Flag { facet, .. } = link else {
                continue;
            };
            if facet.name.is_empty() {
                if let Some(short) = facet.shorthand {
                    return Err(OptError::Misconfigured {
                        key: key.to_string(),
                        reason: format!("shorthand '{short}' given without a flag name"),
                    });
                }
                if facet.has_annotations() {
                    return Err(OptError::Misconfigured {
                        key: key.to_string(),
                        reason: "flag annotations given without a flag name".to_string(),
                    });
                }
            }
            if let Some(short) = facet.shorthand
                && !short.is_ascii_alphanumeric()
            {
                return Err(OptError::Misconfigured {
                    key: key.to_string(),
                    reason: format!(
                        "shorthand '{short}' for --{} must be an ASCII letter or digit",
                        facet.name
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Root of a `String` option.
pub fn text(key: &str) -> Builder<String> {
    Builder::new(key)
}

/// Root of a `bool` option.
pub fn boolean(key: &str) -> Builder<bool> {
    Builder::new(key)
}

/// Root of an `i64` option.
pub fn int(key: &str) -> Builder<i64> {
    Builder::new(key)
}

/// Immutable description of one option, built up one facet at a time.
///
/// Every method returns a new builder that extends the receiver and leaves
/// it untouched, so a partial chain can be shared by several options:
///
/// ```ignore
/// let base = optchain::text("endpoint").env("ENDPOINT");
/// let primary = base.default("https://a.example").build(&registry)?;
/// let backup = base.default("https://b.example").build(&registry)?;
/// ```
///
/// When a facet is set more than once, the most recent call wins for lookup.
/// The type converter is fixed by the constructor and never changes.
pub struct Builder<T> {
    head: Arc<Link>,
    convert: Converter<T>,
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            head: Arc::clone(&self.head),
            convert: self.convert,
        }
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("key", &self.key())
            .field("flag", &self.flag_name())
            .field("env", &self.env_name())
            .field("default", &self.default_text())
            .finish()
    }
}

impl<T: OptValue> Builder<T> {
    /// Start a chain for `key` using the type's own converter. A `bool`
    /// option's flag also accepts being given bare, meaning `true`.
    pub fn new(key: &str) -> Self {
        Self::root(key, T::SWITCH, T::from_text)
    }
}

impl<T> Builder<T> {
    /// Start a chain for `key` with a custom converter. Its flag always
    /// takes a value.
    pub fn with_converter(key: &str, convert: Converter<T>) -> Self {
        Self::root(key, false, convert)
    }

    fn root(key: &str, switch: bool, convert: Converter<T>) -> Self {
        Self {
            head: Arc::new(Link::Root {
                key: key.to_string(),
                switch,
            }),
            convert,
        }
    }

    fn extend(&self, make: impl FnOnce(Arc<Link>) -> Link) -> Self {
        Self {
            head: Arc::new(make(Arc::clone(&self.head))),
            convert: self.convert,
        }
    }

    /// Bind a long flag. An empty name disables flag lookup for this option.
    pub fn flag(&self, name: &str, opts: &[FlagOpt]) -> Self {
        let facet = FlagFacet::new(name, None, opts);
        self.extend(|up| Link::Flag { facet, up })
    }

    /// Bind a long flag with a one-character shorthand.
    pub fn flag_p(&self, name: &str, shorthand: char, opts: &[FlagOpt]) -> Self {
        let facet = FlagFacet::new(name, Some(shorthand), opts);
        self.extend(|up| Link::Flag { facet, up })
    }

    /// Bind an environment variable, looked up by this exact name. An empty
    /// name disables environment lookup for this option.
    pub fn env(&self, name: &str) -> Self {
        let name = name.to_string();
        self.extend(|up| Link::Env { name, up })
    }

    /// Bind the environment variable named after the key: `log-level` reads
    /// `LOG_LEVEL`.
    pub fn env_from_key(&self) -> Self {
        self.env(&env_name_for_key(self.key()))
    }

    /// Set the default, as text. It is converted at lookup time and shown
    /// verbatim in flag help.
    pub fn default(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.extend(|up| Link::Default { text, up })
    }

    /// Set the help text shown for the option's flag.
    pub fn usage(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.extend(|up| Link::Usage { text, up })
    }

    pub fn key(&self) -> &str {
        self.head.key()
    }

    pub fn flag_name(&self) -> Option<&str> {
        self.head.flag_name()
    }

    pub fn shorthand(&self) -> Option<char> {
        self.head.flag().and_then(|facet| facet.shorthand)
    }

    pub fn env_name(&self) -> Option<&str> {
        self.head.env_name()
    }

    pub fn default_text(&self) -> Option<&str> {
        self.head.default_text()
    }

    pub fn usage_text(&self) -> Option<&str> {
        self.head.usage_text()
    }

    pub fn converter(&self) -> Converter<T> {
        self.convert
    }

    pub(crate) fn head(&self) -> &Arc<Link> {
        &self.head
    }

    /// Finish the chain: validate it, register it with `registry`, and return
    /// the lookup handle.
    ///
    /// Misconfigurations (empty key, a shorthand or annotations on a disabled
    /// flag, a non-alphanumeric shorthand) are reported here, before anything
    /// is registered.
    pub fn build(&self, registry: &Registry) -> Result<Opt<T>, OptError> {
        self.head.validate()?;
        registry.register(Arc::clone(&self.head));
        Ok(Opt::new(self.clone(), registry.clone()))
    }
}
