pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Forecast API
        .route("/api/v1/forecast", post(handlers::handle_forecast))
        .route(
            "/api/v1/forecast/current",
            get(handlers::handle_current_forecast),
        )
        .route(
            "/api/v1/forecast/schema",
            get(handlers::handle_forecast_schema),
        )
        .with_state(state)
}
