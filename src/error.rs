use std::error::Error;
use std::fmt;
use std::io;

/// Why a persisted body (or population) could not be restored.
#[derive(Debug)]
pub enum RestoreError {
    /// Not valid JSON, or a field is missing or has the wrong type.
    Malformed(serde_json::Error),
    Io(io::Error),
    /// `size` and `mass` must be strictly positive.
    NonPositive { field: &'static str, value: f64 },
    /// `border_thickness` must not be negative.
    Negative { field: &'static str, value: f64 },
    NonFinite { field: &'static str },
    ColorOutOfRange { channel: &'static str, value: i64 },
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::Malformed(e) => write!(f, "malformed body record: {e}"),
            RestoreError::Io(e) => write!(f, "failed to read population: {e}"),
            RestoreError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            RestoreError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            RestoreError::NonFinite { field } => write!(f, "{field} is not a finite number"),
            RestoreError::ColorOutOfRange { channel, value } => {
                write!(f, "color channel {channel} ({value}) is outside 0..=255")
            }
        }
    }
}

impl Error for RestoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RestoreError::Malformed(e) => Some(e),
            RestoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RestoreError {
    fn from(e: serde_json::Error) -> Self {
        RestoreError::Malformed(e)
    }
}

impl From<io::Error> for RestoreError {
    fn from(e: io::Error) -> Self {
        RestoreError::Io(e)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
