//! Text-to-value conversion for option types.
//!
//! Every source hands the resolver plain text; the converter fixed at the
//! root of a chain turns that text into the option's type. Conversion does not
//! know which source the text came from.

/// Converts winning text into an option value. The error is a human-readable
/// reason, wrapped into [`OptError::Conversion`](crate::OptError::Conversion)
/// by the caller.
pub type Converter<T> = fn(&str) -> Result<T, String>;

/// A scalar type that can be used as an option value.
pub trait OptValue: Sized + Send + Sync + 'static {
    /// Whether a flag given without a value means `true`, as in `--verbose`.
    const SWITCH: bool = false;

    fn from_text(text: &str) -> Result<Self, String>;
}

impl OptValue for String {
    fn from_text(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

impl OptValue for bool {
    const SWITCH: bool = true;

    fn from_text(text: &str) -> Result<Self, String> {
        parse_bool(text)
    }
}

impl OptValue for i64 {
    fn from_text(text: &str) -> Result<Self, String> {
        parse_int(text)
    }
}

/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their false
/// counterparts `0`, `f`, `F`, `false`, `FALSE`, `False`.
pub fn parse_bool(text: &str) -> Result<bool, String> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err("expected a boolean (true/false, t/f, 1/0)".to_string()),
    }
}

/// Base-10 signed integer with an optional leading sign.
pub fn parse_int(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|e| format!("expected an integer: {e}"))
}
