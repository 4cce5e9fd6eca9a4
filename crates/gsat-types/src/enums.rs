//! Enumeration types for the scoring engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Scoring rules
// ---------------------------------------------------------------------------

/// Identifier of a scoring rule applied to one answered question.
///
/// The rule set is closed: adding a rule means adding a variant here and
/// a match arm in the engine's rule dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ScoreRuleId {
    /// Full marks minus one point per error, floored at zero.
    Custom,
    /// GSAT 5/3/1/0 ladder by error count.
    #[serde(alias = "gsat")]
    GsatStandard,
    /// Full marks only for an exact match, otherwise zero.
    #[serde(alias = "strict_binary")]
    Strict,
}

impl ScoreRuleId {
    /// Every rule, in display order.
    pub const ALL: [Self; 3] = [Self::Custom, Self::GsatStandard, Self::Strict];

    /// Canonical wire identifier of the rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::GsatStandard => "gsat",
            Self::Strict => "strict",
        }
    }

    /// Human-readable label used in tables and charts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Custom => "Custom (5 - Errors)",
            Self::GsatStandard => "GSAT Standard (5/3/1/0)",
            Self::Strict => "Strict Binary (5 or 0)",
        }
    }
}

impl fmt::Display for ScoreRuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule identifier did not name any known scoring rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScoreRuleError {
    /// The identifier that failed to parse.
    pub identifier: String,
}

impl fmt::Display for ParseScoreRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown score rule: {:?}", self.identifier)
    }
}

impl std::error::Error for ParseScoreRuleError {}

impl FromStr for ScoreRuleId {
    type Err = ParseScoreRuleError;

    /// Parse a rule identifier, case-insensitively.
    ///
    /// Accepts `custom`, `gsat` / `gsat_standard`, and `strict` /
    /// `strict_binary`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "gsat" | "gsat_standard" | "gsatstandard" => Ok(Self::GsatStandard),
            "strict" | "strict_binary" => Ok(Self::Strict),
            _ => Err(ParseScoreRuleError {
                identifier: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation modes
// ---------------------------------------------------------------------------

/// How a [`ScoreRecord`](crate::ScoreRecord) was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EvaluationMode {
    /// Exact expectation over every consistent answer key.
    Exact,
    /// Empirical estimate from repeated random trials.
    Simulated,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_and_alias_identifiers() {
        assert_eq!("custom".parse(), Ok(ScoreRuleId::Custom));
        assert_eq!("GSAT".parse(), Ok(ScoreRuleId::GsatStandard));
        assert_eq!("gsat_standard".parse(), Ok(ScoreRuleId::GsatStandard));
        assert_eq!(" strict ".parse(), Ok(ScoreRuleId::Strict));
        assert_eq!("strict_binary".parse(), Ok(ScoreRuleId::Strict));
    }

    #[test]
    fn parse_rejects_unknown_identifier() {
        let err = "lenient".parse::<ScoreRuleId>().unwrap_err();
        assert_eq!(err.identifier, "lenient");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for rule in ScoreRuleId::ALL {
            assert_eq!(rule.to_string().parse(), Ok(rule));
        }
    }

    #[test]
    fn serde_uses_snake_case_and_accepts_aliases() {
        let json = serde_json::to_string(&ScoreRuleId::GsatStandard).unwrap();
        assert_eq!(json, "\"gsat_standard\"");
        let parsed: ScoreRuleId = serde_json::from_str("\"gsat\"").unwrap();
        assert_eq!(parsed, ScoreRuleId::GsatStandard);
    }
}
