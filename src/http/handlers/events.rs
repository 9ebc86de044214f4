use crate::domain::event::PaymentEvent;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

/// Intake for normalized provider events (the provider-adapter boundary).
/// 200 acknowledges the event so the provider stops redelivering; 500 asks
/// for redelivery, which the idempotent engine absorbs.
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<PaymentEvent>,
) -> impl IntoResponse {
    let result = state.engine.reconcile(event).await;
    let status = if result.fully_dispatched() {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(result)).into_response()
}
