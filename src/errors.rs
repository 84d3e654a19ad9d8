//! All errors that can occur in the viraly library.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ViralyError {
    ConfigurationError(String),
    WriteError(String),
}

pub type Result<T> = std::result::Result<T, ViralyError>;

impl fmt::Display for ViralyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViralyError::ConfigurationError(message) => {
                write!(f, "ConfigurationError: {}", message)
            }
            ViralyError::WriteError(message) => {
                write!(f, "WriteError: {}", message)
            }
        }
    }
}

impl std::error::Error for ViralyError {}

impl From<csv::Error> for ViralyError {
    fn from(error: csv::Error) -> Self {
        ViralyError::WriteError(error.to_string())
    }
}

impl From<std::io::Error> for ViralyError {
    fn from(error: std::io::Error) -> Self {
        ViralyError::WriteError(error.to_string())
    }
}

impl From<serde_yaml::Error> for ViralyError {
    fn from(error: serde_yaml::Error) -> Self {
        ViralyError::WriteError(error.to_string())
    }
}
