use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Icon(#[from] IconError),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum IconError {
    /// A name can only be registered once, before it is first used.
    #[error("icon {name} is already registered")]
    AlreadyRegistered { name: String },
    #[error("icon {name} could not be read from {path}")]
    Unavailable {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("icon {name} could not be decoded")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("popup coordinator is no longer running")]
    Stopped,
}

impl IconError {
    /// Whether the failure only means "render without a graphic".
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Decode { .. })
    }
}
