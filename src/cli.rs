//! Clap adapter for optchain.
//!
//! This module is the optional integration layer between optchain's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ClapFlags`] implements [`FlagSet`] over a `clap::Command`. Registered
//! flags become `--name <VALUE>` arguments with [`ArgAction::Set`]; the
//! default text is passed to clap so it shows up in `--help`, and a flag
//! counts as changed only when its value came from the command line.
//!
//! | Flag annotation | clap setting |
//! |-----------------|--------------|
//! | directory | `ValueHint::DirPath` |
//! | file | `ValueHint::FilePath` |
//! | required | `Arg::required(true)` |
//! | persistent | `Arg::global(true)` |
//! | switch (`bool` options) | `num_args(0..=1)`, `require_equals(true)`, `default_missing_value("true")` |
//!
//! A registered flag may take `-h` or `--help`. clap's generated help flag
//! then gives way: with `-h` taken, help stays reachable as `--help`; with
//! `--help` taken, the generated help flag is dropped.

use std::collections::HashSet;
use std::ffi::OsString;
use std::mem;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use tracing::debug;

use crate::error::OptError;
use crate::flags::FlagSet;

/// [`FlagSet`] backed by a `clap::Command`.
///
/// Arguments are held back until [`parse_args`](FlagSet::parse_args) and
/// added to the command in registration order, so `--help` lists them in
/// declaration order. Parse errors, including `--help` and `--version`
/// requests, come back as [`OptError::Clap`]; call `exit()` on the inner
/// error to print it the way clap normally does.
#[derive(Debug, Default)]
pub struct ClapFlags {
    command: Command,
    pending: Vec<Arg>,
    registered: HashSet<String>,
    matches: Option<ArgMatches>,
}

impl ClapFlags {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }

    /// The command, including every registered flag once parsed.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Matches from the last successful parse.
    pub fn matches(&self) -> Option<&ArgMatches> {
        self.matches.as_ref()
    }

    fn update(&mut self, name: &str, f: impl FnOnce(Arg) -> Arg) {
        if let Some(arg) = self.pending.iter_mut().find(|a| a.get_id() == name) {
            *arg = f(mem::take(arg));
        }
    }
}

impl FlagSet for ClapFlags {
    fn register_string_flag(
        &mut self,
        name: &str,
        shorthand: Option<char>,
        default: &str,
        usage: &str,
    ) {
        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(String));
        if let Some(short) = shorthand {
            arg = arg.short(short);
        }
        if !default.is_empty() {
            arg = arg.default_value(default.to_string());
        }
        if !usage.is_empty() {
            arg = arg.help(usage.to_string());
        }
        self.registered.insert(name.to_string());
        self.pending.push(arg);
    }

    fn mark_directory(&mut self, name: &str) {
        self.update(name, |arg| arg.value_hint(ValueHint::DirPath));
    }

    fn mark_file(&mut self, name: &str) {
        self.update(name, |arg| arg.value_hint(ValueHint::FilePath));
    }

    fn mark_required(&mut self, name: &str) {
        self.update(name, |arg| arg.required(true));
    }

    fn mark_persistent(&mut self, name: &str) {
        self.update(name, |arg| arg.global(true));
    }

    fn mark_switch(&mut self, name: &str) {
        self.update(name, |arg| {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        });
    }

    fn parse_args(&mut self, args: Vec<OsString>) -> Result<(), OptError> {
        let mut command = mem::take(&mut self.command);
        if !self.pending.is_empty() {
            command = yield_help_flag(command, &self.pending);
        }
        for arg in self.pending.drain(..) {
            command = command.arg(arg);
        }
        let result = command.try_get_matches_from_mut(args);
        self.command = command;
        self.matches = Some(result?);
        Ok(())
    }

    fn changed(&self, name: &str) -> bool {
        if !self.registered.contains(name) {
            return false;
        }
        self.matches
            .as_ref()
            .is_some_and(|m| m.value_source(name) == Some(ValueSource::CommandLine))
    }

    fn string_value(&self, name: &str) -> Option<String> {
        if !self.registered.contains(name) {
            return None;
        }
        let matches = self.matches.as_ref()?;
        matches.try_get_one::<String>(name).ok().flatten().cloned()
    }
}

/// Replace clap's generated help flag when a registered flag claims `-h` or
/// `--help`. The setting is global, so subcommands follow.
fn yield_help_flag(command: Command, pending: &[Arg]) -> Command {
    let takes_long = pending
        .iter()
        .any(|a| a.get_id() == "help" || a.get_long() == Some("help"));
    let takes_short = pending.iter().any(|a| a.get_short() == Some('h'));
    if !takes_long && !takes_short {
        return command;
    }
    debug!(takes_long, takes_short, "flag overrides clap's help flag");
    let command = command.disable_help_flag(true);
    if takes_long || command.get_arguments().any(|a| a.get_id() == "help") {
        return command;
    }
    command.arg(
        Arg::new("help")
            .long("help")
            .action(ArgAction::Help)
            .help("Print help")
            .global(true),
    )
}
