use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] etflens_core::ValidationError),

    #[error(transparent)]
    Fetch(#[from] etflens_core::FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Fetch(etflens_core::FetchError::Configuration(_)) => 3,
            Self::Fetch(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
