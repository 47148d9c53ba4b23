pub mod events;
pub mod reservations;

use axum::Router;
use std::sync::Arc;

use crate::error::ApiError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(events::routes())
        .merge(reservations::routes())
}

/// Path segments arrive as text; a non-numeric id is a caller mistake (400),
/// distinct from an id that parses but matches nothing (404).
pub(crate) fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidInput("Invalid event ID".to_string()))
}
