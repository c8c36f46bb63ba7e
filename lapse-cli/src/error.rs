use std::fmt::{Display, Formatter};

use lapse_lib::ParseUnitError;

/// Error type for the console front end.
#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Config(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Config(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ParseUnitError> for CliError {
    fn from(value: ParseUnitError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Io(value.into())
    }
}
