//! Error types for the liveness library.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LivenessError {
    /// A pass was requested while another one is still checking
    #[error("A monitoring pass is already running")]
    PassInProgress,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to read project registry {}: {}", .path.display(), .source)]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project registry {}: {}", .path.display(), .message)]
    RegistryParse { path: PathBuf, message: String },

    #[error("Duplicate project id in registry: {0}")]
    DuplicateProject(String),
}
