//! Application error type.
//!
//! Every error carries the process exit code it should map to:
//!
//! - `2` — usage/config problems (bad flags, malformed reference tables)
//! - `4` — data problems (providers, ingest, exports)
//!
//! Scoring itself never returns an error: input defects and lookup misses
//! are resolved with documented fallbacks so one bad bond cannot abort a
//! batch.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Invalid invocation or reference configuration.
    #[error("{0}")]
    Config(String),

    /// Provider, ingest, or export failure.
    #[error("{0}")]
    Data(String),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        AppError::Data(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Data(_) => 4,
        }
    }
}
