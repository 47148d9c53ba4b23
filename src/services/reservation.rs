use tracing::debug;

use crate::error::ApiError;
use crate::models::SpotStatus;
use crate::store::CatalogStore;

/// Reserves a batch of named spots for one event, all-or-nothing.
///
/// Validation runs in two full passes before anything is written: first
/// every name must resolve to a spot of this event, then every resolved
/// spot must still be available. Each failing pass reports the complete
/// list of offending names so one corrected retry suffices. Only a batch
/// that clears both passes is committed.
pub async fn reserve(
    store: &CatalogStore,
    event_id: i64,
    names: &[String],
) -> Result<(), ApiError> {
    let event = store
        .find_event(event_id)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    // One write guard spans validate and commit, so overlapping batches
    // are linearized and readers never see a half-applied one.
    let mut spots = store.write_spots().await;

    let missing: Vec<&str> = names
        .iter()
        .filter(|name| spots.find_spot(event.id, name).is_none())
        .map(|name| name.as_str())
        .collect();
    if !missing.is_empty() {
        debug!(event_id, ?missing, "reservation rejected: unknown spots");
        return Err(ApiError::NotFound(format!(
            "Spot {} not found",
            missing.join(", ")
        )));
    }

    let taken: Vec<&str> = names
        .iter()
        .filter(|name| {
            spots
                .find_spot(event.id, name)
                .is_some_and(|s| s.status == SpotStatus::Reserved)
        })
        .map(|name| name.as_str())
        .collect();
    if !taken.is_empty() {
        debug!(event_id, ?taken, "reservation rejected: spots taken");
        return Err(ApiError::AlreadyReserved(format!(
            "Spot {} already reserved",
            taken.join(", ")
        )));
    }

    // Duplicate names in one request are applied twice; the second write
    // is a no-op since the spot is already reserved.
    for name in names {
        spots.set_reserved(event.id, name);
    }
    debug!(event_id, count = names.len(), "spots reserved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Spot};
    use std::sync::Arc;

    fn event(id: i64) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            organization: "Org".to_string(),
            date: "2024-06-01".to_string(),
            price: 50.0,
            rating: "free".to_string(),
            image_url: "http://example.com/img.png".to_string(),
            created_at: "2024-01-01T00:00:00".to_string(),
            location: "Main Hall".to_string(),
        }
    }

    fn spot(id: i64, name: &str, status: SpotStatus, event_id: i64) -> Spot {
        Spot {
            id,
            name: name.to_string(),
            status,
            event_id,
        }
    }

    fn store() -> CatalogStore {
        CatalogStore::from_parts(
            vec![event(1), event(2)],
            vec![
                spot(1, "A1", SpotStatus::Available, 1),
                spot(2, "A2", SpotStatus::Reserved, 1),
                spot(3, "B1", SpotStatus::Available, 1),
                spot(4, "A1", SpotStatus::Available, 2),
            ],
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    async fn status_of(store: &CatalogStore, event_id: i64, name: &str) -> SpotStatus {
        store
            .read_spots()
            .await
            .find_spot(event_id, name)
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn reserves_an_available_spot() {
        let store = store();
        reserve(&store, 1, &names(&["A1"])).await.unwrap();
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Reserved);
    }

    #[tokio::test]
    async fn unknown_event_fails_before_spot_checks() {
        let store = store();
        let err = reserve(&store, 99, &names(&["A1"])).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Event not found");
    }

    #[tokio::test]
    async fn reports_every_missing_name_in_input_order() {
        let store = store();
        let err = reserve(&store, 1, &names(&["Z9", "A1", "Y8"]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Spot Z9, Y8 not found");
    }

    #[tokio::test]
    async fn reports_every_taken_name() {
        let store = store();
        reserve(&store, 1, &names(&["B1"])).await.unwrap();
        let err = reserve(&store, 1, &names(&["A2", "B1"])).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyReserved(_)));
        assert_eq!(err.to_string(), "Spot A2, B1 already reserved");
    }

    #[tokio::test]
    async fn existence_is_checked_before_availability() {
        // One missing name and one taken name: the missing one wins.
        let store = store();
        let err = reserve(&store, 1, &names(&["Z9", "A2"])).await.unwrap_err();
        assert_eq!(err.to_string(), "Spot Z9 not found");
    }

    #[tokio::test]
    async fn failed_batch_leaves_every_spot_untouched() {
        let store = store();
        let err = reserve(&store, 1, &names(&["A1", "Z9"])).await.unwrap_err();
        assert_eq!(err.to_string(), "Spot Z9 not found");
        // A1 was individually valid but must not have been committed.
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Available);
    }

    #[tokio::test]
    async fn conflict_batch_leaves_available_spots_untouched() {
        let store = store();
        let err = reserve(&store, 1, &names(&["A1", "A2"])).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyReserved(_)));
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Available);
    }

    #[tokio::test]
    async fn spot_names_resolve_within_the_event_only() {
        // Event 2 also has an "A1"; reserving it must not touch event 1's.
        let store = store();
        reserve(&store, 2, &names(&["A1"])).await.unwrap();
        assert_eq!(status_of(&store, 2, "A1").await, SpotStatus::Reserved);
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Available);
    }

    #[tokio::test]
    async fn duplicate_names_in_one_batch_are_harmless() {
        let store = store();
        reserve(&store, 1, &names(&["A1", "A1"])).await.unwrap();
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Reserved);
    }

    #[tokio::test]
    async fn reserving_twice_fails_the_second_time() {
        let store = store();
        reserve(&store, 1, &names(&["A1"])).await.unwrap();
        let err = reserve(&store, 1, &names(&["A1"])).await.unwrap_err();
        assert_eq!(err.to_string(), "Spot A1 already reserved");
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Reserved);
    }

    #[tokio::test]
    async fn overlapping_concurrent_batches_admit_exactly_one() {
        let store = Arc::new(store());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                reserve(&store, 1, &names(&["A1", "B1"])).await.is_ok()
            }));
        }
        let mut won = 0;
        for handle in handles {
            if handle.await.unwrap() {
                won += 1;
            }
        }
        assert_eq!(won, 1, "exactly one batch may claim the overlapping spots");
        assert_eq!(status_of(&store, 1, "A1").await, SpotStatus::Reserved);
        assert_eq!(status_of(&store, 1, "B1").await, SpotStatus::Reserved);
    }
}
