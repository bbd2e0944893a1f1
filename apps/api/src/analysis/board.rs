//! The single "current forecast" slot the dashboard polls.
//!
//! Every request takes a ticket from `begin`. `finish` only applies the
//! outcome of the most recently issued ticket, so a slow earlier request can
//! never overwrite a newer one. Requests themselves are not cancelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::analysis::insights::ForecastView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastStatus {
    Idle,
    Analyzing,
    Complete,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub status: ForecastStatus,
    /// Ticket of the request this snapshot belongs to; 0 before any request.
    pub ticket: u64,
    pub profession: Option<String>,
    pub forecast_id: Option<Uuid>,
    pub forecast: Option<ForecastView>,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl BoardSnapshot {
    fn idle() -> Self {
        Self {
            status: ForecastStatus::Idle,
            ticket: 0,
            profession: None,
            forecast_id: None,
            forecast: None,
            error: None,
            updated_at: Utc::now(),
        }
    }
}

pub struct ForecastBoard {
    state: RwLock<BoardSnapshot>,
}

impl Default for ForecastBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastBoard {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BoardSnapshot::idle()),
        }
    }

    /// Starts a new request: clears the previous result and error and
    /// returns the ticket the outcome must be filed under.
    pub async fn begin(&self, profession: &str) -> u64 {
        let mut state = self.state.write().await;
        let ticket = state.ticket + 1;
        *state = BoardSnapshot {
            status: ForecastStatus::Analyzing,
            ticket,
            profession: Some(profession.to_string()),
            forecast_id: None,
            forecast: None,
            error: None,
            updated_at: Utc::now(),
        };
        ticket
    }

    /// Files the outcome of `ticket`. Returns `false` (and changes nothing)
    /// when a newer request has started since.
    pub async fn finish(&self, ticket: u64, outcome: Result<ForecastView, String>) -> bool {
        let mut state = self.state.write().await;
        if state.ticket != ticket {
            debug!(
                "Discarding stale forecast outcome: ticket {ticket}, latest {}",
                state.ticket
            );
            return false;
        }

        match outcome {
            Ok(view) => {
                state.status = ForecastStatus::Complete;
                state.forecast_id = Some(Uuid::new_v4());
                state.forecast = Some(view);
                state.error = None;
            }
            Err(message) => {
                state.status = ForecastStatus::Error;
                state.forecast_id = None;
                state.forecast = None;
                state.error = Some(message);
            }
        }
        state.updated_at = Utc::now();
        true
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::client::tests::truck_driver_json;
    use crate::analysis::models::ProfessionAnalysis;

    fn view() -> ForecastView {
        let analysis: ProfessionAnalysis = serde_json::from_value(truck_driver_json()).unwrap();
        ForecastView::from_analysis(analysis)
    }

    #[tokio::test]
    async fn test_new_board_is_idle() {
        let board = ForecastBoard::new();
        let snap = board.snapshot().await;
        assert_eq!(snap.status, ForecastStatus::Idle);
        assert_eq!(snap.ticket, 0);
        assert!(snap.forecast.is_none());
    }

    #[tokio::test]
    async fn test_begin_then_finish_completes() {
        let board = ForecastBoard::new();
        let ticket = board.begin("Truck Driver").await;
        assert_eq!(board.snapshot().await.status, ForecastStatus::Analyzing);

        assert!(board.finish(ticket, Ok(view())).await);
        let snap = board.snapshot().await;
        assert_eq!(snap.status, ForecastStatus::Complete);
        assert_eq!(snap.profession.as_deref(), Some("Truck Driver"));
        assert!(snap.forecast_id.is_some());
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn test_error_outcome_clears_forecast() {
        let board = ForecastBoard::new();
        let first = board.begin("Truck Driver").await;
        board.finish(first, Ok(view())).await;

        let second = board.begin("Truck Driver").await;
        board
            .finish(second, Err("quota exceeded".to_string()))
            .await;

        let snap = board.snapshot().await;
        assert_eq!(snap.status, ForecastStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("quota exceeded"));
        assert!(snap.forecast.is_none());
    }

    #[tokio::test]
    async fn test_begin_clears_previous_result() {
        let board = ForecastBoard::new();
        let first = board.begin("Truck Driver").await;
        board.finish(first, Ok(view())).await;

        board.begin("Pilot").await;
        let snap = board.snapshot().await;
        assert_eq!(snap.status, ForecastStatus::Analyzing);
        assert!(snap.forecast.is_none());
        assert_eq!(snap.profession.as_deref(), Some("Pilot"));
    }

    #[tokio::test]
    async fn test_stale_outcome_is_discarded() {
        let board = ForecastBoard::new();
        let slow = board.begin("Truck Driver").await;
        let fast = board.begin("Pilot").await;

        assert!(board.finish(fast, Err("quota exceeded".to_string())).await);
        assert!(!board.finish(slow, Ok(view())).await);

        let snap = board.snapshot().await;
        assert_eq!(snap.ticket, fast);
        assert_eq!(snap.status, ForecastStatus::Error);
        assert_eq!(snap.profession.as_deref(), Some("Pilot"));
    }

    #[tokio::test]
    async fn test_snapshot_status_wire_format() {
        let board = ForecastBoard::new();
        board.begin("Nurse").await;
        let v = serde_json::to_value(board.snapshot().await).unwrap();
        assert_eq!(v["status"], "ANALYZING");
        assert_eq!(v["profession"], "Nurse");
    }
}
