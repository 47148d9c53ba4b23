use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{ApiError, MessageResponse};
use crate::services::reservation;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/events/{event_id}/reserve", post(reserve_spots))
}

async fn reserve_spots(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = super::parse_event_id(&event_id)?;
    let Json(names) = payload.map_err(|_| {
        ApiError::InvalidInput(
            "Invalid request body. Expected an array of strings with the spot names".to_string(),
        )
    })?;

    reservation::reserve(&state.catalog, event_id, &names).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Spots reserved successfully")),
    ))
}
