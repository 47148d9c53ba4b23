use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub organization: String,
    pub date: String,
    pub price: f64,
    pub rating: String,
    pub image_url: String,
    pub created_at: String,
    pub location: String,
}
