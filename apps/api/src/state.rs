use std::sync::Arc;

use crate::analysis::board::ForecastBoard;
use crate::analysis::client::AnalysisClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: AnalysisClient,
    /// The one "current forecast" slot; newest request wins.
    pub board: Arc<ForecastBoard>,
    pub config: Config,
}
