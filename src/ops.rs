//! Diagnostics listing: what each registered option is bound to and where its
//! value currently comes from.
//!
//! Values are shown as the raw winning text, before conversion, so a listing
//! can be produced even when a value would fail to convert.

use std::fmt;

use serde::Serialize;

use crate::builder::Link;
use crate::resolve::Resolved;
use crate::types::Source;

/// One registered option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionReport {
    pub key: String,
    pub flag: Option<String>,
    pub shorthand: Option<char>,
    pub env: Option<String>,
    pub default: Option<String>,
    pub usage: Option<String>,
    /// Winning source, `None` when nothing supplies a value.
    pub source: Option<Source>,
    /// Winning text, before conversion.
    pub value: Option<String>,
}

impl OptionReport {
    pub(crate) fn new(chain: &Link, resolved: Option<Resolved>) -> Self {
        let (source, value) = match resolved {
            Some(Resolved { source, text }) => (Some(source), Some(text)),
            None => (None, None),
        };
        Self {
            key: chain.key().to_string(),
            flag: chain.flag_name().map(str::to_string),
            shorthand: chain
                .flag_name()
                .and_then(|_| chain.flag())
                .and_then(|facet| facet.shorthand),
            env: chain.env_name().map(str::to_string),
            default: chain.default_text().map(str::to_string),
            usage: chain.usage_text().map(str::to_string),
            source,
            value,
        }
    }
}

/// All registered options, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub entries: Vec<OptionReport>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match (&entry.value, &entry.source) {
                (Some(value), Some(source)) => {
                    write!(f, "{} = {value:?}  # {source}", entry.key)?;
                }
                _ => write!(f, "{} = <not set>", entry.key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder;
    use crate::fixtures::test::{FakeEnv, FakeFlags};
    use crate::registry::Registry;

    fn sample() -> Listing {
        let env = FakeEnv::new();
        env.set("RETRIES", "5");
        let registry = Registry::new(FakeFlags::new(), env);
        builder::int("retries")
            .env("RETRIES")
            .default("3")
            .build(&registry)
            .unwrap();
        builder::text("out")
            .flag_p("out", 'o', &[])
            .usage("Output directory")
            .build(&registry)
            .unwrap();
        builder::boolean("debug")
            .default("false")
            .build(&registry)
            .unwrap();
        registry.parse_from(["prog", "-o", "dist"]).unwrap();
        registry.report()
    }

    #[test]
    fn report_lists_in_declaration_order() {
        let listing = sample();
        let keys: Vec<&str> = listing.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["retries", "out", "debug"]);
    }

    #[test]
    fn report_captures_bindings_and_source() {
        let listing = sample();
        let out = &listing.entries[1];
        assert_eq!(out.flag.as_deref(), Some("out"));
        assert_eq!(out.shorthand, Some('o'));
        assert_eq!(out.env, None);
        assert_eq!(out.usage.as_deref(), Some("Output directory"));
        assert_eq!(out.source, Some(Source::Flag("out".into())));
        assert_eq!(out.value.as_deref(), Some("dist"));

        let retries = &listing.entries[0];
        assert_eq!(retries.source, Some(Source::Env("RETRIES".into())));
        assert_eq!(retries.value.as_deref(), Some("5"));
        assert_eq!(retries.default.as_deref(), Some("3"));
    }

    #[test]
    fn display_format() {
        let listing = sample();
        assert_eq!(
            listing.to_string(),
            "retries = \"5\"  # env RETRIES\nout = \"dist\"  # flag --out\ndebug = \"false\"  # default"
        );
    }

    #[test]
    fn display_unset() {
        let registry = Registry::new(FakeFlags::new(), FakeEnv::new());
        builder::text("token").env("TOKEN").build(&registry).unwrap();
        assert_eq!(registry.report().to_string(), "token = <not set>");
    }

    #[test]
    fn serializes_to_json() {
        let listing = sample();
        let json = serde_json::to_value(&listing).unwrap();
        let retries = &json["entries"][0];
        assert_eq!(retries["key"], "retries");
        assert_eq!(retries["source"]["kind"], "env");
        assert_eq!(retries["source"]["name"], "RETRIES");
        assert_eq!(json["entries"][2]["source"]["kind"], "default");
        assert!(json["entries"][1]["env"].is_null());
    }
}
