//! Shared type definitions for the GSAT multiple-choice scoring engine.
//!
//! This crate is the single source of truth for every value that crosses
//! the boundary between the scoring engine and the web UI. Types defined
//! here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Scoring rule identifiers and evaluation modes
//! - [`records`] -- Score records, strategy rows, and simulation comparisons

pub mod enums;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use enums::{EvaluationMode, ParseScoreRuleError, ScoreRuleId};
pub use records::{ScoreRecord, SimulationComparison, StrategyRow};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Exporting writes the `.ts` files into `bindings/` relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::enums::ScoreRuleId::export_all();
        let _ = crate::enums::EvaluationMode::export_all();
        let _ = crate::records::ScoreRecord::export_all();
        let _ = crate::records::StrategyRow::export_all();
        let _ = crate::records::SimulationComparison::export_all();
    }
}
