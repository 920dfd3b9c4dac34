//! CLI error type and exit codes.

use std::fmt;

use xnbify::convert::ConvertError;

/// Exit code for invalid or missing arguments.
pub const EXIT_USAGE: i32 = 1;

/// Exit code for a failed conversion.
pub const EXIT_FAILURE: i32 = 2;

/// Errors surfaced by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Missing or inconsistent arguments.
    Usage(String),
    /// The configuration file could not be loaded.
    Config(String),
    /// A conversion failed.
    Convert(ConvertError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => EXIT_USAGE,
            CliError::Config(_) | CliError::Convert(_) => EXIT_FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Convert(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Convert(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::Usage(msg) => CliError::Usage(msg),
            other => CliError::Convert(other),
        }
    }
}
