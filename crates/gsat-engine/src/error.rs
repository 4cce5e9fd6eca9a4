//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and serving so
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gsat_core::ConfigError,
    },

    /// The startup evaluation failed.
    #[error("scoring error: {source}")]
    Scoring {
        /// The underlying scoring error.
        #[from]
        source: gsat_core::ScoringError,
    },

    /// The HTTP server failed to start or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: gsat_observer::ServerError,
    },
}
