use crate::error::ApiError;
use crate::models::{Event, Spot};
use crate::store::CatalogStore;

pub fn list_events(store: &CatalogStore) -> Vec<Event> {
    store.events().to_vec()
}

pub fn get_event(store: &CatalogStore, id: i64) -> Result<Event, ApiError> {
    store
        .find_event(id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

pub async fn list_spots(store: &CatalogStore, event_id: i64) -> Result<Vec<Spot>, ApiError> {
    let event = store
        .find_event(event_id)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    Ok(store.read_spots().await.for_event(event.id))
}
