use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Event, Spot, SpotStatus};

/// On-disk shape of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    events: Vec<Event>,
    spots: Vec<Spot>,
}

/// In-memory catalog, loaded once at startup and shared for the process
/// lifetime. Events are immutable after load; the spot list is the single
/// mutable resource, behind a shared-reads/exclusive-write lock.
#[derive(Debug)]
pub struct CatalogStore {
    events: Vec<Event>,
    spots: RwLock<Vec<Spot>>,
}

impl CatalogStore {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        let data: CatalogFile = serde_json::from_slice(&raw)
            .with_context(|| format!("catalog file {} is not valid JSON", path.display()))?;
        Self::from_parts(data.events, data.spots)
    }

    /// Every spot must reference a loaded event; an orphan spot means the
    /// data file is inconsistent and the process must not start.
    pub fn from_parts(events: Vec<Event>, spots: Vec<Spot>) -> anyhow::Result<Self> {
        for spot in &spots {
            if !events.iter().any(|e| e.id == spot.event_id) {
                bail!(
                    "spot {} ({}) references unknown event {}",
                    spot.id,
                    spot.name,
                    spot.event_id
                );
            }
        }
        Ok(CatalogStore {
            events,
            spots: RwLock::new(spots),
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_event(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub async fn read_spots(&self) -> SpotsRead<'_> {
        SpotsRead(self.spots.read().await)
    }

    /// Exclusive access for a validate-then-commit sequence. Hold the guard
    /// for the whole batch so concurrent reservations are linearized.
    pub async fn write_spots(&self) -> SpotsWrite<'_> {
        SpotsWrite(self.spots.write().await)
    }
}

fn find_in<'a>(spots: &'a [Spot], event_id: i64, name: &str) -> Option<&'a Spot> {
    spots
        .iter()
        .find(|s| s.event_id == event_id && s.name == name)
}

fn for_event(spots: &[Spot], event_id: i64) -> Vec<Spot> {
    spots
        .iter()
        .filter(|s| s.event_id == event_id)
        .cloned()
        .collect()
}

pub struct SpotsRead<'a>(RwLockReadGuard<'a, Vec<Spot>>);

impl SpotsRead<'_> {
    pub fn find_spot(&self, event_id: i64, name: &str) -> Option<&Spot> {
        find_in(&self.0, event_id, name)
    }

    /// All spots for one event, in load order.
    pub fn for_event(&self, event_id: i64) -> Vec<Spot> {
        for_event(&self.0, event_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct SpotsWrite<'a>(RwLockWriteGuard<'a, Vec<Spot>>);

impl SpotsWrite<'_> {
    pub fn find_spot(&self, event_id: i64, name: &str) -> Option<&Spot> {
        find_in(&self.0, event_id, name)
    }

    pub fn for_event(&self, event_id: i64) -> Vec<Spot> {
        for_event(&self.0, event_id)
    }

    /// Flips the matching spot to reserved, mutating the owned record in
    /// place. Iterating a cloned list and updating the clone would silently
    /// lose the write.
    pub fn set_reserved(&mut self, event_id: i64, name: &str) {
        for spot in self.0.iter_mut() {
            if spot.event_id == event_id && spot.name == name {
                spot.status = SpotStatus::Reserved;
            }
        }
    }
}
