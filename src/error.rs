use std::fmt;

/// Exit status for an unrecognized flag or stray argument.
pub const USAGE_EXIT: i32 = 15;
/// Exit status for a flag that needs a value but got none.
pub const MISSING_VALUE_EXIT: i32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub enum CliError {
    /// Print usage to stderr and exit with code 0.
    Help(String),
    /// Print message and usage to stderr and exit with code 15.
    Usage { message: String, usage: String },
    /// A required-value flag was given without an operand.
    MissingValue(char),
    /// A required parameter never appeared on the command line.
    MissingRequired(&'static str),
    /// A value could not be parsed; each parameter has its own exit code.
    InvalidValue {
        parameter: &'static str,
        value: String,
        code: i32,
    },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Help(_) => 0,
            CliError::Usage { .. } => USAGE_EXIT,
            CliError::MissingValue(_) | CliError::MissingRequired(_) => MISSING_VALUE_EXIT,
            CliError::InvalidValue { code, .. } => *code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Help(usage) => write!(f, "{}", usage),
            CliError::Usage { message, usage } => write!(f, "{}\n{}", message, usage),
            CliError::MissingValue(flag) if flag.is_ascii_graphic() => {
                write!(f, "-{} requires operand", flag)
            }
            CliError::MissingValue(_) => write!(f, "Flag requires operand"),
            CliError::MissingRequired(parameter) => {
                write!(f, "Missing required parameter: {}", parameter)
            }
            CliError::InvalidValue {
                parameter, value, ..
            } => write!(f, "{}: invalid number '{}'", parameter, value),
        }
    }
}

impl std::error::Error for CliError {}
