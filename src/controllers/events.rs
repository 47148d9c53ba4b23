use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Event, Spot};
use crate::services::query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/spots", get(list_spots))
}

async fn list_events(State(state): State<Arc<AppState>>) -> Json<Vec<Event>> {
    Json(query::list_events(&state.catalog))
}

async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let event_id = super::parse_event_id(&event_id)?;
    Ok(Json(query::get_event(&state.catalog, event_id)?))
}

async fn list_spots(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Spot>>, ApiError> {
    let event_id = super::parse_event_id(&event_id)?;
    Ok(Json(query::list_spots(&state.catalog, event_id).await?))
}
