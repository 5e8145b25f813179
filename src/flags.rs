use std::ffi::OsString;

use crate::error::OptError;

/// The flag-parsing library the registry drives.
///
/// Every option flag is registered as a string flag; typing happens later, at
/// lookup, through the option's converter. Implementations own the parsed
/// state and answer `changed` / `string_value` both before and after
/// [`parse_args`](Self::parse_args). Before parsing, no flag is changed.
///
/// With the `clap` feature, [`ClapFlags`](crate::ClapFlags) implements this
/// over a `clap::Command`.
pub trait FlagSet: Send + Sync {
    /// Declare a string flag. `default` and `usage` may be empty.
    fn register_string_flag(
        &mut self,
        name: &str,
        shorthand: Option<char>,
        default: &str,
        usage: &str,
    );

    /// Hint that the flag's value is a directory name.
    fn mark_directory(&mut self, name: &str);

    /// Hint that the flag's value is a file name.
    fn mark_file(&mut self, name: &str);

    /// Require the flag on the command line.
    fn mark_required(&mut self, name: &str);

    /// Make the flag visible to subcommands.
    fn mark_persistent(&mut self, name: &str);

    /// Let the flag be given without a value, standing for `true`. An
    /// explicit value then has to be attached, as in `--name=false`.
    fn mark_switch(&mut self, name: &str);

    /// Consume the program arguments, including the program name in first
    /// position.
    fn parse_args(&mut self, args: Vec<OsString>) -> Result<(), OptError>;

    /// Whether the flag was given explicitly on the command line.
    fn changed(&self, name: &str) -> bool;

    /// The flag's current string value, if it has one.
    fn string_value(&self, name: &str) -> Option<String>;
}
