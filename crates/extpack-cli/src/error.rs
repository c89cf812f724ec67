//! Errors surfaced by the `extpack` binary

/// Result alias for command handlers
pub type Result<T> = std::result::Result<T, CliError>;

/// Anything that ends a command with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A workflow stopped; the message names the failing stage
    #[error(transparent)]
    Core(#[from] extpack_core::Error),

    /// Resolving the working directory or creating a target folder failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A refusal or missing input, reported as-is
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
