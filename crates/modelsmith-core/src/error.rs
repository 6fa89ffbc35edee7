//! Error types for modelsmith operations

use std::path::Path;
use thiserror::Error;

/// Result type alias for modelsmith operations
pub type ModelsmithResult<T> = Result<T, ModelsmithError>;

/// Error type for modelsmith operations
///
/// Extraction never produces these: a source file that cannot be understood
/// yields "no data" instead. Errors are reserved for configuration, user input,
/// and I/O against the project tree.
#[derive(Error, Debug)]
pub enum ModelsmithError {
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is structurally valid TOML but semantically wrong
    #[error("configuration error: {0}")]
    Config(String),

    /// A resource name cannot be turned into an identifier
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A `--fields`, `--relations` or `--props` entry could not be parsed
    #[error("invalid field spec: {0}")]
    InvalidFieldSpec(String),

    /// Requested artifact kind does not exist
    #[error("unknown artifact kind: {0}")]
    UnknownArtifactKind(String),

    /// A generator needs a parameter that was not supplied
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file is not valid TOML
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ModelsmithError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ModelsmithError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Process exit code for the CLI, following sysexits(3)
    pub fn exit_code(&self) -> i32 {
        match self {
            ModelsmithError::InvalidName(_)
            | ModelsmithError::InvalidFieldSpec(_)
            | ModelsmithError::UnknownArtifactKind(_)
            | ModelsmithError::MissingParameter(_) => 64,
            ModelsmithError::Serialization(_) => 65,
            ModelsmithError::Io { .. } => 74,
            ModelsmithError::Config(_) | ModelsmithError::Toml(_) => 78,
        }
    }
}
