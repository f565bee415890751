//! Error taxonomy for tell.
//!
//! Environment and credential problems are fatal and immediate; they do not
//! self-correct within a single run. Corrupt history is the one error that
//! is never surfaced (the store treats it as no history).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TellError {
    /// The host is not a supported platform. No retry.
    #[error("this tool currently supports Linux only")]
    UnsupportedPlatform,

    /// No API key in the config file or the environment.
    #[error("missing Groq API key. Set GROQ_API_KEY or add api_key to the config file")]
    MissingCredential,

    /// The remote call failed (connection, timeout, or API-level error).
    #[error("Groq API error: {0}")]
    Transport(String),

    /// The model returned nothing usable after cleanup.
    #[error("no command returned by model")]
    EmptyGeneration,

    /// The configured shell executable could not be launched.
    #[error("shell not found: {0}")]
    ShellNotFound(String),
}
