//! Liveness and readiness probes.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::state::AppState;

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct ReadyzResponse {
    status: &'static str,
    backend: &'static str,
    checks: BTreeMap<&'static str, bool>,
}

/// `GET /readyz`: 200 when the store answers a ping, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let timeout = Duration::from_secs(state.config().database.acquire_timeout_secs.max(1));
    let database_ready = tokio::time::timeout(timeout, state.store().ping())
        .await
        .is_ok_and(|res| res.is_ok());

    let mut checks = BTreeMap::new();
    checks.insert("database", database_ready);

    let all_ready = checks.values().all(|ok| *ok);
    if !all_ready {
        tracing::warn!(?checks, "readiness check failed");
    }
    let status = if all_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyzResponse {
            status: if all_ready { "ready" } else { "not_ready" },
            backend: state.store().backend_name(),
            checks,
        }),
    )
}
