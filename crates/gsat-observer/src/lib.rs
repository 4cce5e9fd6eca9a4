//! HTTP API for the GSAT scoring engine.
//!
//! This crate provides an Axum HTTP server through which the web UI
//! requests exact score tables, simulations, and simulation-vs-theory
//! comparisons. Every endpoint is a stateless request/response wrapper
//! around [`gsat_core`]; the only shared state is the read-only
//! [`ScoringConfig`](gsat_core::ScoringConfig).
//!
//! Simulations run on Tokio's blocking pool so long trial runs never
//! stall the async workers, and each request owns its random source.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
