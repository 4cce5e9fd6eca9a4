//! Shared application state for the HTTP API.

use gsat_core::ScoringConfig;

/// State shared by every handler.
///
/// Holds only the configuration; evaluations are computed per request.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Effective configuration.
    pub config: ScoringConfig,
}

impl AppState {
    /// Wrap a loaded configuration.
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Decimal places applied to every response.
    pub const fn precision(&self) -> u8 {
        self.config.display.precision
    }
}
