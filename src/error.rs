//! Error handling module for operator prompts
//!
//! Separates recoverable user-input failures from mistakes in how a prompt
//! was configured. Only [`PromptError::Validation`] is ever retried.

use thiserror::Error;

/// Main error type for prompting
#[derive(Error, Debug)]
pub enum PromptError {
    /// IO errors (terminal reads and writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// User input rejected by a filter; the message is shown to the operator
    #[error("{0}")]
    Validation(String),

    /// Filter or template constructed inconsistently by the calling code
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid arguments handed to a prompt operation (e.g. no candidates)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The input channel reached end of file while a prompt was waiting
    #[error("Input closed before a valid value was entered")]
    InputClosed,

    /// The operator pressed Ctrl-C during a hidden read
    #[error("Prompt interrupted")]
    Interrupted,
}

/// Result type alias for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

impl PromptError {
    /// Create a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// True when the prompt that produced this error should ask again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
