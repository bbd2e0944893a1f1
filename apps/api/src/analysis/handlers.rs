//! Axum route handlers for the Forecast API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::analysis::board::BoardSnapshot;
use crate::analysis::client::FALLBACK_ERROR_MESSAGE;
use crate::analysis::insights::ForecastView;
use crate::analysis::schema::response_schema;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub profession: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forecast
///
/// Runs one forecast for the given profession and files the outcome on the
/// board. Each call hits the model; nothing is cached.
pub async fn handle_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastView>, AppError> {
    if request.profession.trim().is_empty() {
        return Err(AppError::Validation(
            "profession cannot be empty".to_string(),
        ));
    }

    let ticket = state.board.begin(&request.profession).await;

    // Detached so the outcome is filed even if the caller hangs up mid-call.
    let analyzer = state.analyzer.clone();
    let board = state.board.clone();
    let profession = request.profession;
    let task = tokio::spawn(async move {
        match analyzer.analyze(&profession).await {
            Ok(analysis) => {
                let view = ForecastView::from_analysis(analysis);
                board.finish(ticket, Ok(view.clone())).await;
                Ok(view)
            }
            Err(e) => {
                board.finish(ticket, Err(e.to_string())).await;
                Err(e)
            }
        }
    });

    match task.await {
        Ok(outcome) => Ok(Json(outcome?)),
        Err(e) => {
            error!("Forecast task for ticket {ticket} did not complete: {e}");
            state
                .board
                .finish(ticket, Err(FALLBACK_ERROR_MESSAGE.to_string()))
                .await;
            Err(AppError::Internal(e.to_string()))
        }
    }
}

/// GET /api/v1/forecast/current
///
/// Returns the board: status plus the latest applied forecast or error.
pub async fn handle_current_forecast(State(state): State<AppState>) -> Json<BoardSnapshot> {
    Json(state.board.snapshot().await)
}

/// GET /api/v1/forecast/schema
///
/// Returns the structured-output schema sent to the model.
pub async fn handle_forecast_schema() -> Json<Value> {
    Json(response_schema())
}
