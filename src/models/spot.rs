use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Available,
    Reserved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub id: i64,
    pub name: String,
    pub status: SpotStatus,
    pub event_id: i64,
}
