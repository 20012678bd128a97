use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub coordinates: Coordinates,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name,
            coordinates,
            created_at: now,
            updated_at: now,
        }
    }
}
