use thiserror::Error;

use crate::types::Source;

#[derive(Debug, Error)]
pub enum OptError {
    #[error("Option '{key}' has no value ({})", describe_sources(.flag, .env))]
    MissingOption {
        key: String,
        flag: Option<String>,
        env: Option<String>,
    },

    #[error("Invalid value '{text}' for option '{key}' (from {origin}): {reason}")]
    Conversion {
        key: String,
        origin: Source,
        text: String,
        reason: String,
    },

    #[error("Option key must not be empty")]
    EmptyKey,

    #[error("Misconfigured option '{key}': {reason}")]
    Misconfigured { key: String, reason: String },

    #[error("Options were already parsed; call .parse() once per registry")]
    AlreadyParsed,

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[cfg(feature = "clap")]
    #[error(transparent)]
    Clap(#[from] clap::Error),
}

fn describe_sources(flag: &Option<String>, env: &Option<String>) -> String {
    let flag = match flag {
        Some(name) => format!("flag --{name} not set"),
        None => "no flag".to_string(),
    };
    let env = match env {
        Some(name) => format!("env {name} not set"),
        None => "no env".to_string(),
    };
    format!("{flag}, {env}, no default")
}
