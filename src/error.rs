// file: src/error.rs
// version: 1.0.0
// guid: 3f1c9a2e-5b7d-4e08-9a61-2c4d8e7f0b15

use thiserror::Error;

/// Result type alias for kubefedctl
pub type Result<T> = std::result::Result<T, FedCtlError>;

/// Error types for kubefedctl
#[derive(Error, Debug)]
pub enum FedCtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("kubectl command failed: {command} (exit code: {exit_code:?}): {stderr}")]
    Kubectl {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl FedCtlError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new kubeconfig error
    pub fn kubeconfig(msg: impl Into<String>) -> Self {
        Self::Kubeconfig(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new logging error
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// Create a new other error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether the error came from kubectl reporting a missing object
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Kubectl { stderr, .. } => stderr.contains("NotFound") || stderr.contains("not found"),
            _ => false,
        }
    }
}
