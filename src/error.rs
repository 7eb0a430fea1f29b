// Error types shared by every pattern in the catalog.
// Each variant is a local validation failure; none of them are retried.

use thiserror::Error;

/// Failure modes for the pattern constructs.
/// Ambient variants (`Io`, `Config`) only come from loading configuration.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("'{0}' does not exist")]
    NotFound(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("'{device}' does not support {capability}")]
    Incompatible { device: String, capability: String },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

impl PatternError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn incompatible(device: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::Incompatible {
            device: device.into(),
            capability: capability.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;
