//! Readiness endpoint

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::{AppState, Storage};

async fn ready(State(storage): State<Storage>) -> Response {
    let check: HealthCheckFuture = match storage {
        Storage::Mongo { db, .. } => Box::pin(async move {
            let status = check_health_detailed(&db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        }),
        Storage::InMemory => Box::pin(async { Ok(()) }),
    };

    run_health_checks(vec![("database", check)])
        .await
        .into_response()
}

/// Router exposing `GET /ready`.
pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state.storage.clone())
}
