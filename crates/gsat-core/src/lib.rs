//! Exact and Monte Carlo scoring engine for multiple-choice questions
//! under partial knowledge.
//!
//! A five-option GSAT question may have any non-empty set of correct
//! options. A test-taker who knows `x` options are correct and `y` are
//! incorrect must decide how many of the remaining options to guess. This
//! crate computes the expected score, its standard deviation, and the full
//! score distribution for every such strategy, and cross-checks the result
//! with a seeded simulation.
//!
//! # Modules
//!
//! - [`options`] -- Option labels and bit-vector [`OptionSet`]s.
//! - [`world`] -- [`AnswerKey`]s and the [`WorldSpace`] of all valid keys.
//! - [`constraint`] -- Declared knowledge and the [`FilteredWorldSpace`].
//! - [`rule`] -- The [`ScoreRule`] dispatch for Custom, GSAT, and Strict.
//! - [`stats`] -- Score tallies and running moments.
//! - [`exact`] -- The [`ExactEvaluator`].
//! - [`monte_carlo`] -- The [`MonteCarloEvaluator`].
//! - [`strategy`] -- All-rule tables and simulation-vs-theory comparison.
//! - [`api`] -- Count-based entry points for the UI layer.
//! - [`config`] -- Typed YAML configuration.
//! - [`error`] -- [`ScoringError`].
//!
//! # Usage
//!
//! ```
//! use gsat_core::{ScoringConfig, evaluate_all, simulate};
//! use gsat_types::ScoreRuleId;
//!
//! let config = ScoringConfig::default();
//!
//! // Two options known correct, none known incorrect.
//! let records = evaluate_all(2, 0, ScoreRuleId::GsatStandard, &config)?;
//! assert_eq!(records.len(), 4);
//! assert!((records[1].mean - 2.125).abs() < 1e-9);
//!
//! let simulated = simulate(2, 0, 1, ScoreRuleId::GsatStandard, 10_000, Some(42), &config)?;
//! assert_eq!(simulated.sample_size, 10_000);
//! # Ok::<(), gsat_core::ScoringError>(())
//! ```

pub mod api;
pub mod config;
pub mod constraint;
pub mod error;
pub mod exact;
pub mod monte_carlo;
pub mod options;
pub mod rule;
pub mod stats;
pub mod strategy;
pub mod world;

// Re-export primary types at crate root.
pub use api::{evaluate, evaluate_all, rng_for, simulate, simulate_with_rng};
pub use config::{ConfigError, ScoringConfig};
pub use constraint::{FilteredWorldSpace, KnowledgeConstraint, filter};
pub use error::ScoringError;
pub use exact::ExactEvaluator;
pub use monte_carlo::MonteCarloEvaluator;
pub use options::{DEFAULT_OPTION_COUNT, MAX_OPTIONS, OptionSet};
pub use rule::{ErrorCount, FULL_MARKS, ScoreRule, parse_rule};
pub use strategy::{best_guess_count, best_guess_counts, compare, compare_all, strategy_table};
pub use world::{AnswerKey, WorldSpace};
