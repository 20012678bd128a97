use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    auth::User,
    entities::{Location, UserPreferences},
    error::Error,
    store::Backend,
};

#[derive(Debug, Default)]
struct Tables {
    locations: HashMap<Uuid, Vec<Location>>,
    preferences: HashMap<Uuid, UserPreferences>,
}

/// Process-local backend. Data lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_locations(&self, user: &User) -> Result<Vec<Location>, Error> {
        let tables = self.tables.lock().await;

        Ok(tables
            .locations
            .get(&user.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_location(&self, user: &User, location: &Location) -> Result<(), Error> {
        let mut tables = self.tables.lock().await;
        let locations = tables.locations.entry(user.id).or_default();

        locations.retain(|existing| existing.id != location.id);
        locations.push(location.clone());

        Ok(())
    }

    async fn delete_location(&self, user: &User, id: Uuid) -> Result<(), Error> {
        let mut tables = self.tables.lock().await;

        if let Some(locations) = tables.locations.get_mut(&user.id) {
            locations.retain(|location| location.id != id);
        }

        Ok(())
    }

    async fn get_preferences(&self, user: &User) -> Result<Option<UserPreferences>, Error> {
        Ok(self.tables.lock().await.preferences.get(&user.id).cloned())
    }

    async fn save_preferences(
        &self,
        user: &User,
        preferences: &UserPreferences,
    ) -> Result<(), Error> {
        self.tables
            .lock()
            .await
            .preferences
            .insert(user.id, preferences.clone());

        Ok(())
    }
}
