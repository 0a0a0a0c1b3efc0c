//! HTTP server for the rollcast round log and forecast API.
//!
//! Serves the round log and every analytics query as JSON, for dashboards
//! or scripts that prefer HTTP over the CLI. Appends and clears persist
//! through the same `LogStore` the CLI uses, so both frontends share one
//! file.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use rollcast_core::{
    Forecast, LogStore, OutcomeFrequency, Round, RoundLog, State, StateCounts, StatePercents,
    TrendAggregate, TrendDirection,
};

/// Shared server state.
struct AppState {
    log: Mutex<RoundLog>,
    store: LogStore,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RoundsParams {
    /// Maximum number of most-recent rounds to return.
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct AddRoundRequest {
    roll1: u8,
    roll2: u8,
}

#[derive(Serialize)]
struct RoundsResponse {
    rounds: Vec<Round>,
    total: usize,
}

#[derive(Serialize)]
struct AddRoundResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    round: Option<Round>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ClearResponse {
    success: bool,
    cleared: usize,
}

#[derive(Serialize)]
struct TransitionRow {
    from: State,
    observed: u32,
    /// `None` when no transition out of `from` was ever observed.
    percents: Option<StatePercents>,
}

#[derive(Serialize)]
struct StatsResponse {
    total_rounds: usize,
    window: usize,
    trend: Option<TrendAggregate>,
    dominant_trend: Option<TrendDirection>,
    outcome_frequency: OutcomeFrequency,
    state_dominance: StateCounts,
    last_state: Option<State>,
    transitions: Vec<TransitionRow>,
}

#[derive(Serialize)]
struct PredictResponse {
    can_predict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast: Option<Forecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favored: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    rounds: usize,
    data_path: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "rollcast",
        "version": rollcast_core::VERSION,
        "endpoints": {
            "GET /api/v1/rounds": "recent rounds (?limit=N)",
            "POST /api/v1/rounds": "append a round {roll1, roll2}",
            "DELETE /api/v1/rounds": "clear the log",
            "GET /api/v1/stats": "window and transition summaries",
            "GET /api/v1/predict": "next-outcome forecast with reasoning",
            "GET /health": "server health",
        },
    }))
}

async fn handle_get_rounds(
    AxumState(state): AxumState<Arc<AppState>>,
    Query(params): Query<RoundsParams>,
) -> Json<RoundsResponse> {
    let log = state.log.lock().await;
    let all = log.rounds();
    let limit = params.limit.unwrap_or(all.len()).min(all.len());
    Json(RoundsResponse {
        rounds: all[all.len() - limit..].to_vec(),
        total: all.len(),
    })
}

async fn handle_add_round(
    AxumState(state): AxumState<Arc<AppState>>,
    Json(req): Json<AddRoundRequest>,
) -> (StatusCode, Json<AddRoundResponse>) {
    let mut log = state.log.lock().await;
    match log.append(req.roll1, req.roll2) {
        Ok(round) => {
            if let Err(e) = state.store.save(&log) {
                log::error!("failed to save log: {e}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AddRoundResponse {
                        success: false,
                        round: None,
                        error: Some(format!("round appended but save failed: {e}")),
                    }),
                );
            }
            (
                StatusCode::OK,
                Json(AddRoundResponse {
                    success: true,
                    round: Some(round),
                    error: None,
                }),
            )
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(AddRoundResponse {
                success: false,
                round: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

async fn handle_clear(
    AxumState(state): AxumState<Arc<AppState>>,
) -> (StatusCode, Json<ClearResponse>) {
    let mut log = state.log.lock().await;
    let cleared = log.len();
    log.clear();
    if let Err(e) = state.store.save(&log) {
        log::error!("failed to save cleared log: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ClearResponse {
                success: false,
                cleared: 0,
            }),
        );
    }
    (
        StatusCode::OK,
        Json(ClearResponse {
            success: true,
            cleared,
        }),
    )
}

async fn handle_stats(AxumState(state): AxumState<Arc<AppState>>) -> Json<StatsResponse> {
    let log = state.log.lock().await;
    let matrix = log.transition_matrix();
    let transitions = State::ALL
        .iter()
        .map(|&from| TransitionRow {
            from,
            observed: matrix.map(|m| m.row_total(from)).unwrap_or(0),
            percents: matrix.and_then(|m| m.probabilities(from)),
        })
        .collect();

    Json(StatsResponse {
        total_rounds: log.len(),
        window: log.window(),
        trend: log.trend_aggregate(),
        dominant_trend: log.dominant_trend(),
        outcome_frequency: log.outcome_frequency(),
        state_dominance: log.state_dominance(),
        last_state: log.last_state(),
        transitions,
    })
}

async fn handle_predict(AxumState(state): AxumState<Arc<AppState>>) -> Json<PredictResponse> {
    let log = state.log.lock().await;
    match log.predict() {
        Ok(forecast) => Json(PredictResponse {
            can_predict: true,
            favored: Some(forecast.favored().to_string()),
            forecast: Some(forecast),
            reason: None,
        }),
        Err(e) => Json(PredictResponse {
            can_predict: false,
            forecast: None,
            favored: None,
            reason: Some(e.to_string()),
        }),
    }
}

async fn handle_health(AxumState(state): AxumState<Arc<AppState>>) -> Json<HealthResponse> {
    let log = state.log.lock().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        rounds: log.len(),
        data_path: state.store.path().display().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the axum router.
fn build_router(log: RoundLog, store: LogStore) -> Router {
    let state = Arc::new(AppState {
        log: Mutex::new(log),
        store,
    });

    Router::new()
        .route("/", get(handle_index))
        .route(
            "/api/v1/rounds",
            get(handle_get_rounds)
                .post(handle_add_round)
                .delete(handle_clear),
        )
        .route("/api/v1/stats", get(handle_stats))
        .route("/api/v1/predict", get(handle_predict))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the HTTP server until the process is stopped.
pub async fn run_server(log: RoundLog, store: LogStore, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(log, store);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(pairs: &[(u8, u8)]) -> Arc<AppState> {
        let tmp = std::env::temp_dir().join(format!("rollcast-server-test-{}.json", std::process::id()));
        let mut log = RoundLog::new();
        for &(r1, r2) in pairs {
            log.append(r1, r2).unwrap();
        }
        Arc::new(AppState {
            log: Mutex::new(log),
            store: LogStore::new(tmp),
        })
    }

    #[tokio::test]
    async fn test_predict_insufficient_data() {
        let state = test_state(&[(10, 10)]);
        let Json(resp) = handle_predict(AxumState(state)).await;
        assert!(!resp.can_predict);
        assert!(resp.reason.unwrap().contains("not enough data"));
    }

    #[tokio::test]
    async fn test_predict_with_enough_rounds() {
        let state = test_state(&[(10, 10), (20, 30), (15, 25), (40, 12), (30, 18)]);
        let Json(resp) = handle_predict(AxumState(state)).await;
        assert!(resp.can_predict);
        let forecast = resp.forecast.unwrap();
        assert_eq!(forecast.kecil_percent + forecast.besar_percent, 100);
    }

    #[tokio::test]
    async fn test_get_rounds_limit() {
        let state = test_state(&[(10, 10), (20, 20), (30, 30)]);
        let Json(resp) = handle_get_rounds(
            AxumState(state),
            Query(RoundsParams { limit: Some(2) }),
        )
        .await;
        assert_eq!(resp.total, 3);
        assert_eq!(resp.rounds.len(), 2);
        assert_eq!(resp.rounds[1].roll2, 30);
    }

    #[tokio::test]
    async fn test_add_round_rejects_out_of_range() {
        let state = test_state(&[]);
        let (status, Json(resp)) = handle_add_round(
            AxumState(state),
            Json(AddRoundRequest { roll1: 5, roll2: 20 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("5"));
    }

    #[tokio::test]
    async fn test_stats_shape() {
        let state = test_state(&[(10, 10), (20, 35)]);
        let Json(resp) = handle_stats(AxumState(state)).await;
        assert_eq!(resp.total_rounds, 2);
        assert_eq!(resp.transitions.len(), 4);
        assert_eq!(resp.last_state, Some(State::High));
        assert_eq!(resp.outcome_frequency.kecil, 1);
        assert_eq!(resp.outcome_frequency.besar, 1);
    }
}
