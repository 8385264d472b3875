//! Error taxonomy for icon generation

use std::path::PathBuf;

/// Convenience result type used across the generator.
pub type Result<T> = std::result::Result<T, IconError>;

#[derive(thiserror::Error, Debug)]
pub enum IconError {
    /// A capability the pipeline needs (PNG encoding, output directory) is unavailable.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// An output spec or requested dimension is unusable.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    /// Writing a single output file failed. Non-fatal for the pipeline.
    #[error("failed to write {filename} to {}: {source}", path.display())]
    OutputWrite {
        filename: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl IconError {
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    /// Fatal errors abort before any output is produced.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::OutputWrite { .. })
    }
}
