//! Integration tests for the scoring API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gsat_core::ScoringConfig;
use gsat_observer::router::build_router;
use gsat_observer::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(ScoringConfig::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(uri: &str) -> (StatusCode, Body) {
    let response = build_router(make_test_state())
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    (response.status(), response.into_body())
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let response = build_router(make_test_state())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body_to_json(body).await["status"], "ok");
}

#[tokio::test]
async fn test_config_reports_defaults() {
    let (status, body) = get("/api/config").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    assert_eq!(json["scoring"]["option_count"], 5);
    assert_eq!(json["scoring"]["default_rule"], "custom");
    assert_eq!(json["display"]["precision"], 4);
}

#[tokio::test]
async fn test_exact_gsat_two_known_correct() {
    let (status, body) = get("/api/exact?x=2&y=0&rule=gsat").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[1]["guess_count"], 1);
    assert_eq!(records[1]["total_selected"], 3);
    assert_eq!(records[1]["rule"], "gsat_standard");
    assert_eq!(records[1]["mode"], "exact");
    assert_eq!(records[1]["sample_size"], 8);
    assert_eq!(records[1]["mean"], 2.125);
    assert_eq!(records[1]["std_dev"], 1.536);
    assert_eq!(records[1]["distribution"]["3"], 0.375);
}

#[tokio::test]
async fn test_exact_uses_default_rule() {
    let (status, body) = get("/api/exact?x=0&y=0").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    assert_eq!(json[0]["rule"], "custom");
    assert_eq!(json[0]["mean"], 0.0);
    assert_eq!(json[0]["distribution"]["0"], 1.0);
    // 76 / 31 rounded to four places.
    assert_eq!(json[1]["mean"], 2.4516);
}

#[tokio::test]
async fn test_exact_rejects_overfull_knowledge() {
    let (status, body) = get("/api/exact?x=3&y=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = body_to_json(body).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("invalid knowledge constraint"));
}

#[tokio::test]
async fn test_exact_rejects_unknown_rule() {
    let (status, body) = get("/api/exact?x=1&y=0&rule=lenient").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = body_to_json(body).await;
    assert!(json["error"].as_str().unwrap().contains("unknown score rule"));
}

#[tokio::test]
async fn test_table_reports_best_guess_counts() {
    let (status, body) = get("/api/table?x=0&y=0").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    assert_eq!(json["rows"].as_array().unwrap().len(), 6);
    assert_eq!(json["rows"][3]["records"]["gsat_standard"]["mean"], 0.9677);
    assert_eq!(json["best_guess_count"]["custom"], 5);
    assert_eq!(json["best_guess_count"]["gsat_standard"], 3);
    assert_eq!(json["best_guess_count"]["strict"], 1);
}

#[tokio::test]
async fn test_simulate_is_reproducible_with_seed() {
    let uri = "/api/simulate?x=1&y=1&z=1&rule=custom&trials=5000&seed=7";
    let (status_a, body_a) = get(uri).await;
    let (status_b, body_b) = get(uri).await;
    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    let a = body_to_json(body_a).await;
    let b = body_to_json(body_b).await;
    assert_eq!(a, b);
    assert_eq!(a["mode"], "simulated");
    assert_eq!(a["sample_size"], 5000);
}

#[tokio::test]
async fn test_simulate_uses_default_trial_count() {
    let (status, body) = get("/api/simulate?x=2&y=0&z=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body_to_json(body).await["sample_size"], 1000);
}

#[tokio::test]
async fn test_simulate_rejects_non_positive_trials() {
    let (status, body) = get("/api/simulate?x=2&y=0&z=1&trials=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = body_to_json(body).await;
    assert!(json["error"].as_str().unwrap().contains("trial count"));
}

#[tokio::test]
async fn test_simulate_rejects_infeasible_guess_count() {
    let (status, _) = get("/api/simulate?x=2&y=2&z=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_simulate_rejects_trials_above_ceiling() {
    let (status, _) = get("/api/simulate?x=0&y=0&z=1&trials=2000000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_pairs_simulation_with_theory() {
    let (status, body) =
        get("/api/compare?x=2&y=0&z=1&rule=gsat&trials=100000&seed=42").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    assert_eq!(json["theoretical"]["mean"], 2.125);
    assert_eq!(json["theoretical"]["mode"], "exact");
    assert_eq!(json["simulated"]["mode"], "simulated");
    assert!(json["mean_difference"].as_f64().unwrap().abs() < 0.03);
}

#[tokio::test]
async fn test_compare_all_rules_shares_sampled_keys() {
    let (status, body) = get("/api/compare?x=0&y=0&z=3&rule=all&trials=50000&seed=7").await;
    assert_eq!(status, StatusCode::OK);
    let json = body_to_json(body).await;
    assert_eq!(json["custom"]["theoretical"]["mean"], 2.5161);
    assert_eq!(json["gsat_standard"]["theoretical"]["mean"], 0.9677);
    assert_eq!(json["strict"]["theoretical"]["mean"], 0.1613);
    for rule in ["custom", "gsat_standard", "strict"] {
        assert_eq!(json[rule]["simulated"]["sample_size"], 50_000);
        assert_eq!(json[rule]["simulated"]["total_selected"], 3);
        assert!(json[rule]["mean_difference"].as_f64().unwrap().abs() < 0.05);
    }

    // Each rule's entry equals the single-rule comparison with the same seed.
    let (_, body) = get("/api/compare?x=0&y=0&z=3&rule=strict&trials=50000&seed=7").await;
    assert_eq!(body_to_json(body).await, json["strict"]);
}

#[tokio::test]
async fn test_compare_all_rules_validates_inputs() {
    let (status, body) = get("/api/compare?x=4&y=0&z=2&rule=ALL&seed=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body_to_json(body).await["status"], 400);
}

#[tokio::test]
async fn test_missing_query_parameter_is_rejected() {
    let (status, body) = get("/api/exact?x=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = body_to_json(body).await;
    assert_eq!(json["status"], 400);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("invalid query"), "{message}");
    assert!(message.contains("`y`"), "{message}");
}

#[tokio::test]
async fn test_malformed_query_parameter_is_rejected_as_json() {
    for uri in [
        "/api/exact?x=abc&y=0",
        "/api/table?x=0",
        "/api/simulate?x=0&y=0&z=one",
        "/api/compare?x=0&y=0&z=1&seed=-3",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let json = body_to_json(body).await;
        assert_eq!(json["status"], 400, "{uri}");
        assert!(json["error"].as_str().unwrap().starts_with("invalid query"), "{uri}");
    }
}
