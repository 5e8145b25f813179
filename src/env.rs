use std::collections::{BTreeMap, HashMap};

/// Read access to environment variables.
///
/// The resolver only ever asks for one variable by its literal name. Maps
/// implement this too, so tests can pass synthetic data instead of touching
/// the process environment.
pub trait EnvSource: Send + Sync {
    /// Value of `name`, or `None` when the variable is absent. An empty value
    /// is present.
    fn lookup_env(&self, name: &str) -> Option<String>;
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are converted lossily rather than treated
/// as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup_env(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup_env(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup_env(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Environment variable name derived from an option key: upper-cased, with
/// `-` replaced by `_`.
pub fn env_name_for_key(key: &str) -> String {
    key.to_uppercase().replace('-', "_")
}
