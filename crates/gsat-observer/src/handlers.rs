//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML index |
//! | `GET` | `/api/health` | Liveness probe |
//! | `GET` | `/api/config` | Effective configuration |
//! | `GET` | `/api/exact` | Exact records for every guess count |
//! | `GET` | `/api/table` | Exact records for every rule and guess count |
//! | `GET` | `/api/simulate` | Simulated record for one strategy |
//! | `GET` | `/api/compare` | Simulated record next to the exact one |
//!
//! `/api/compare?rule=all` compares every rule over the same sampled keys.
//! All numbers in responses are rounded to `display.precision` places.
//! Missing or malformed query parameters are reported as JSON errors.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use gsat_core::config::ScoringConfig;
use gsat_core::{best_guess_counts, parse_rule};
use gsat_types::{ScoreRecord, ScoreRuleId, SimulationComparison, StrategyRow};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/exact`.
#[derive(Debug, Deserialize)]
pub struct ExactQuery {
    /// Options known correct.
    pub x: i64,
    /// Options known incorrect.
    pub y: i64,
    /// Rule identifier; the configured default when absent.
    pub rule: Option<String>,
}

/// Query parameters for `GET /api/table`.
#[derive(Debug, Deserialize)]
pub struct TableQuery {
    /// Options known correct.
    pub x: i64,
    /// Options known incorrect.
    pub y: i64,
}

/// Query parameters for `GET /api/simulate` and `GET /api/compare`.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Options known correct.
    pub x: i64,
    /// Options known incorrect.
    pub y: i64,
    /// Options guessed.
    pub z: i64,
    /// Rule identifier; the configured default when absent.
    pub rule: Option<String>,
    /// Trial count; the configured default when absent.
    pub trials: Option<i64>,
    /// Seed for a reproducible run; OS entropy when absent.
    pub seed: Option<u64>,
}

/// Response body of `GET /api/table`.
#[derive(Debug, Serialize)]
pub struct TableResponse {
    /// One row per feasible guess count.
    pub rows: Vec<StrategyRow>,
    /// Guess count with the highest mean, per rule.
    pub best_guess_count: BTreeMap<ScoreRuleId, u32>,
}

/// Response body of `GET /api/compare`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompareResponse {
    /// Comparison for the requested rule.
    Single(SimulationComparison),
    /// Comparison for every rule, keyed by rule identifier.
    AllRules(BTreeMap<ScoreRuleId, SimulationComparison>),
}

/// `rule` value selecting every rule in `GET /api/compare`.
const ALL_RULES: &str = "all";

fn resolve_rule(rule: Option<&str>, config: &ScoringConfig) -> Result<ScoreRuleId, ObserverError> {
    rule.map_or(Ok(config.scoring.default_rule), |r| Ok(parse_rule(r)?))
}

/// Run a CPU-bound evaluation on the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T, ObserverError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, gsat_core::ScoringError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ObserverError::Internal(format!("evaluation task failed: {e}")))?
        .map_err(ObserverError::from)
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML index
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page listing the API.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = &state.config;
    let options = config.scoring.option_count;
    let rule = config.scoring.default_rule.label();
    let max_trials = config.simulation.max_trial_count;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>GSAT Multichoice Scoring</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>GSAT Multichoice Scoring Strategies</h1>
    <p>Options per question: {options} &middot; Default rule: {rule} &middot; Max trials: {max_trials}</p>
    <ul>
        <li><a href="/api/health">/api/health</a></li>
        <li><a href="/api/config">/api/config</a></li>
        <li><a href="/api/exact?x=2&amp;y=0">/api/exact?x=2&amp;y=0</a></li>
        <li><a href="/api/table?x=0&amp;y=0">/api/table?x=0&amp;y=0</a></li>
        <li><a href="/api/simulate?x=2&amp;y=0&amp;z=1&amp;trials=1000">/api/simulate?x=2&amp;y=0&amp;z=1&amp;trials=1000</a></li>
        <li><a href="/api/compare?x=2&amp;y=0&amp;z=1&amp;rule=gsat">/api/compare?x=2&amp;y=0&amp;z=1&amp;rule=gsat</a></li>
        <li><a href="/api/compare?x=0&amp;y=0&amp;z=3&amp;rule=all">/api/compare?x=0&amp;y=0&amp;z=3&amp;rule=all</a></li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/health, /api/config
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Return the effective configuration.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ScoringConfig> {
    Json(state.config.clone())
}

// ---------------------------------------------------------------------------
// GET /api/exact, /api/table
// ---------------------------------------------------------------------------

/// Exact records for every feasible guess count under one rule.
pub async fn exact(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ExactQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoreRecord>>, ObserverError> {
    let Query(query) = query?;
    let rule = resolve_rule(query.rule.as_deref(), &state.config)?;
    let config = state.config.clone();
    let records =
        run_blocking(move || gsat_core::evaluate_all(query.x, query.y, rule, &config)).await?;
    let precision = state.precision();
    Ok(Json(records.iter().map(|r| r.rounded(precision)).collect()))
}

/// Exact records for every rule and guess count, with the best guess
/// count per rule.
pub async fn table(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TableQuery>, QueryRejection>,
) -> Result<Json<TableResponse>, ObserverError> {
    let Query(query) = query?;
    let config = state.config.clone();
    let rows = run_blocking(move || gsat_core::strategy_table(query.x, query.y, &config)).await?;
    let best_guess_count = best_guess_counts(&rows);
    let precision = state.precision();
    Ok(Json(TableResponse {
        rows: rows.iter().map(|r| r.rounded(precision)).collect(),
        best_guess_count,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/simulate, /api/compare
// ---------------------------------------------------------------------------

/// Simulated record for one strategy.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SimulateQuery>, QueryRejection>,
) -> Result<Json<ScoreRecord>, ObserverError> {
    let Query(query) = query?;
    let rule = resolve_rule(query.rule.as_deref(), &state.config)?;
    let trials = query
        .trials
        .unwrap_or_else(|| i64::from(state.config.simulation.default_trial_count));
    info!(x = query.x, y = query.y, z = query.z, %rule, trials, "Simulation requested");

    let config = state.config.clone();
    let record = run_blocking(move || {
        gsat_core::simulate(query.x, query.y, query.z, rule, trials, query.seed, &config)
    })
    .await?;
    Ok(Json(record.rounded(state.precision())))
}

/// Simulated record next to the exact record for the same strategy, or
/// for every rule when `rule=all`.
pub async fn compare(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SimulateQuery>, QueryRejection>,
) -> Result<Json<CompareResponse>, ObserverError> {
    let Query(query) = query?;
    let all_rules = query
        .rule
        .as_deref()
        .is_some_and(|r| r.trim().eq_ignore_ascii_case(ALL_RULES));
    let rule = if all_rules {
        None
    } else {
        Some(resolve_rule(query.rule.as_deref(), &state.config)?)
    };
    let trials = query
        .trials
        .unwrap_or_else(|| i64::from(state.config.simulation.default_trial_count));
    info!(
        x = query.x,
        y = query.y,
        z = query.z,
        rule = rule.map_or(ALL_RULES, ScoreRuleId::as_str),
        trials,
        "Comparison requested"
    );

    let config = state.config.clone();
    let precision = state.precision();
    let response = run_blocking(move || match rule {
        Some(rule) => gsat_core::compare(query.x, query.y, query.z, rule, trials, query.seed, &config)
            .map(|c| CompareResponse::Single(c.rounded(precision))),
        None => gsat_core::compare_all(query.x, query.y, query.z, trials, query.seed, &config).map(
            |all| {
                CompareResponse::AllRules(
                    all.into_iter()
                        .map(|(rule, c)| (rule, c.rounded(precision)))
                        .collect(),
                )
            },
        ),
    })
    .await?;
    Ok(Json(response))
}
