#[cfg(test)]
pub mod test {
    use std::collections::{HashMap, HashSet};
    use std::ffi::OsString;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::env::EnvSource;
    use crate::error::OptError;
    use crate::flags::FlagSet;

    /// Everything a [`FakeFlags`] was asked to do, in call order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FlagEvent {
        Register {
            name: String,
            shorthand: Option<char>,
            default: String,
            usage: String,
        },
        MarkDirectory(String),
        MarkFile(String),
        MarkRequired(String),
        MarkPersistent(String),
        MarkSwitch(String),
        Parse(Vec<String>),
    }

    #[derive(Debug, Default)]
    struct FlagState {
        events: Vec<FlagEvent>,
        shorthands: HashMap<char, String>,
        switches: HashSet<String>,
        /// name -> (value, changed)
        values: HashMap<String, (String, bool)>,
        queried: Vec<String>,
    }

    /// In-memory flag set. Clones share state, so a test keeps one handle
    /// and gives the other to the registry.
    ///
    /// Understands `--name value`, `--name=value` and `-s value`, plus a
    /// bare `--name` / `-s` for switches; anything else that starts with `-`
    /// and is not registered is rejected.
    #[derive(Debug, Clone, Default)]
    pub struct FakeFlags {
        state: Arc<Mutex<FlagState>>,
    }

    impl FakeFlags {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pretend `name` was given on the command line.
        pub fn set_changed(&self, name: &str, value: &str) {
            self.state
                .lock()
                .values
                .insert(name.to_string(), (value.to_string(), true));
        }

        /// Give `name` a value without marking it as given.
        pub fn set_unchanged(&self, name: &str, value: &str) {
            self.state
                .lock()
                .values
                .insert(name.to_string(), (value.to_string(), false));
        }

        pub fn events(&self) -> Vec<FlagEvent> {
            self.state.lock().events.clone()
        }

        pub fn registered_names(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|event| match event {
                    FlagEvent::Register { name, .. } => Some(name),
                    _ => None,
                })
                .collect()
        }

        /// Names passed to `changed`, in call order.
        pub fn queried(&self) -> Vec<String> {
            self.state.lock().queried.clone()
        }
    }

    impl FlagSet for FakeFlags {
        fn register_string_flag(
            &mut self,
            name: &str,
            shorthand: Option<char>,
            default: &str,
            usage: &str,
        ) {
            let mut state = self.state.lock();
            state.events.push(FlagEvent::Register {
                name: name.to_string(),
                shorthand,
                default: default.to_string(),
                usage: usage.to_string(),
            });
            if let Some(short) = shorthand {
                state.shorthands.insert(short, name.to_string());
            }
            state
                .values
                .insert(name.to_string(), (default.to_string(), false));
        }

        fn mark_directory(&mut self, name: &str) {
            let event = FlagEvent::MarkDirectory(name.to_string());
            self.state.lock().events.push(event);
        }

        fn mark_file(&mut self, name: &str) {
            let event = FlagEvent::MarkFile(name.to_string());
            self.state.lock().events.push(event);
        }

        fn mark_required(&mut self, name: &str) {
            let event = FlagEvent::MarkRequired(name.to_string());
            self.state.lock().events.push(event);
        }

        fn mark_persistent(&mut self, name: &str) {
            let event = FlagEvent::MarkPersistent(name.to_string());
            self.state.lock().events.push(event);
        }

        fn mark_switch(&mut self, name: &str) {
            let mut state = self.state.lock();
            state.events.push(FlagEvent::MarkSwitch(name.to_string()));
            state.switches.insert(name.to_string());
        }

        fn parse_args(&mut self, args: Vec<OsString>) -> Result<(), OptError> {
            let args: Vec<String> = args
                .into_iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            let mut state = self.state.lock();
            state.events.push(FlagEvent::Parse(args.clone()));

            let mut rest = args.into_iter().skip(1);
            while let Some(arg) = rest.next() {
                let (name, inline) = if let Some(long) = arg.strip_prefix("--") {
                    match long.split_once('=') {
                        Some((name, value)) => (name.to_string(), Some(value.to_string())),
                        None => (long.to_string(), None),
                    }
                } else if let Some(short) = arg.strip_prefix('-') {
                    let mut chars = short.chars();
                    let name = match (chars.next(), chars.next()) {
                        (Some(c), None) => state.shorthands.get(&c).cloned(),
                        _ => None,
                    };
                    (name.unwrap_or_else(|| arg.clone()), None)
                } else {
                    continue;
                };
                if !state.values.contains_key(&name) {
                    return Err(OptError::InvalidArgs(format!("unknown flag {arg}")));
                }
                let value = match inline {
                    Some(value) => value,
                    None if state.switches.contains(&name) => "true".to_string(),
                    None => rest
                        .next()
                        .ok_or_else(|| OptError::InvalidArgs(format!("{arg} needs a value")))?,
                };
                state.values.insert(name, (value, true));
            }
            Ok(())
        }

        fn changed(&self, name: &str) -> bool {
            let mut state = self.state.lock();
            state.queried.push(name.to_string());
            state.values.get(name).is_some_and(|(_, changed)| *changed)
        }

        fn string_value(&self, name: &str) -> Option<String> {
            self.state
                .lock()
                .values
                .get(name)
                .map(|(value, _)| value.clone())
        }
    }

    #[derive(Debug, Default)]
    struct EnvState {
        vars: HashMap<String, String>,
        queried: Vec<String>,
    }

    /// In-memory environment that can change after being handed to a
    /// registry, and records which names were looked up.
    #[derive(Debug, Clone, Default)]
    pub struct FakeEnv {
        state: Arc<Mutex<EnvState>>,
    }

    impl FakeEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, name: &str, value: &str) {
            self.state
                .lock()
                .vars
                .insert(name.to_string(), value.to_string());
        }

        pub fn remove(&self, name: &str) {
            self.state.lock().vars.remove(name);
        }

        pub fn queried(&self) -> Vec<String> {
            self.state.lock().queried.clone()
        }
    }

    impl EnvSource for FakeEnv {
        fn lookup_env(&self, name: &str) -> Option<String> {
            let mut state = self.state.lock();
            state.queried.push(name.to_string());
            state.vars.get(name).cloned()
        }
    }

    #[test]
    fn fake_flags_parse_long_short_and_inline() {
        let mut flags = FakeFlags::new();
        flags.register_string_flag("name", Some('n'), "", "");
        flags.register_string_flag("level", None, "1", "");
        flags.register_string_flag("mode", None, "", "");
        flags
            .parse_args(
                ["prog", "-n", "x", "--level=3", "pos", "--mode", "fast"]
                    .into_iter()
                    .map(OsString::from)
                    .collect(),
            )
            .unwrap();
        assert!(flags.changed("name"));
        assert_eq!(flags.string_value("name").as_deref(), Some("x"));
        assert_eq!(flags.string_value("level").as_deref(), Some("3"));
        assert_eq!(flags.string_value("mode").as_deref(), Some("fast"));
    }

    #[test]
    fn fake_flags_reject_unknown() {
        let mut flags = FakeFlags::new();
        let err = flags
            .parse_args(vec!["prog".into(), "--nope".into(), "1".into()])
            .unwrap_err();
        assert!(err.to_string().contains("--nope"));
    }

    #[test]
    fn fake_flags_accept_bare_switch() {
        let mut flags = FakeFlags::new();
        flags.register_string_flag("verbose", Some('v'), "false", "");
        flags.mark_switch("verbose");
        flags.register_string_flag("quiet", None, "false", "");
        flags.mark_switch("quiet");
        flags
            .parse_args(vec!["prog".into(), "-v".into(), "--quiet=false".into()])
            .unwrap();
        assert_eq!(flags.string_value("verbose").as_deref(), Some("true"));
        assert_eq!(flags.string_value("quiet").as_deref(), Some("false"));
        assert!(flags.changed("quiet"));
    }
}
