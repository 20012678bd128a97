mod location_store;
mod memory;
mod postgres;

pub use location_store::LocationStore;
pub use memory::MemoryBackend;
pub use postgres::PgBackend;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    auth::User,
    entities::{Location, UserPreferences},
    error::Error,
};

/// Persistence for locations and preferences, scoped per user.
#[async_trait]
pub trait Backend {
    async fn list_locations(&self, user: &User) -> Result<Vec<Location>, Error>;
    async fn add_location(&self, user: &User, location: &Location) -> Result<(), Error>;
    async fn delete_location(&self, user: &User, id: Uuid) -> Result<(), Error>;

    /// `None` when the user never saved preferences.
    async fn get_preferences(&self, user: &User) -> Result<Option<UserPreferences>, Error>;
    async fn save_preferences(&self, user: &User, preferences: &UserPreferences)
        -> Result<(), Error>;
}

pub type DynBackend = std::sync::Arc<dyn Backend + Send + Sync>;
