use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    auth::User,
    entities::{Coordinates, Location, RouteOption, RouteStep, TravelMode, UserPreferences},
    error::{database_error, Error},
    external::DirectionsProvider,
    store::{Backend, MemoryBackend},
};

/// A route from (0, 0) to (1, 1) bending through `(0.5, 0.5 + bend)`.
pub fn route_option(index: usize, distance: f64, bend: f64) -> RouteOption {
    RouteOption {
        index,
        distance,
        duration: distance / 1.4,
        steps: vec![
            RouteStep {
                instruction: "Head northeast".into(),
                distance: distance / 2.0,
            },
            RouteStep {
                instruction: "You have arrived at your destination".into(),
                distance: distance / 2.0,
            },
        ],
        geometry: vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.5, 0.5 + bend),
            Coordinates::new(1.0, 1.0),
        ],
    }
}

/// Answers every lookup with the same alternatives.
pub struct StaticDirections {
    pub routes: Vec<RouteOption>,
    pub calls: AtomicUsize,
}

impl StaticDirections {
    pub fn new(routes: Vec<RouteOption>) -> Self {
        Self {
            routes,
            calls: AtomicUsize::new(0),
        }
    }

    /// Alternatives with the given distances, in order.
    pub fn with_distances(distances: &[f64]) -> Self {
        Self::new(
            distances
                .iter()
                .enumerate()
                .map(|(i, distance)| route_option(i, *distance, 0.1 * i as f64))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectionsProvider for StaticDirections {
    async fn fetch_routes(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TravelMode,
    ) -> Result<Vec<RouteOption>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.routes.clone())
    }
}

/// A backend whose every call fails.
pub struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    async fn list_locations(&self, _user: &User) -> Result<Vec<Location>, Error> {
        Err(database_error("offline"))
    }

    async fn add_location(&self, _user: &User, _location: &Location) -> Result<(), Error> {
        Err(database_error("offline"))
    }

    async fn delete_location(&self, _user: &User, _id: Uuid) -> Result<(), Error> {
        Err(database_error("offline"))
    }

    async fn get_preferences(&self, _user: &User) -> Result<Option<UserPreferences>, Error> {
        Err(database_error("offline"))
    }

    async fn save_preferences(
        &self,
        _user: &User,
        _preferences: &UserPreferences,
    ) -> Result<(), Error> {
        Err(database_error("offline"))
    }
}

/// A memory backend whose `list_locations`, once armed, reads its result and
/// then waits for `release` before returning it.
#[derive(Default)]
pub struct GatedBackend {
    pub inner: MemoryBackend,
    armed: AtomicBool,
    entered: Notify,
    gate: Notify,
}

impl GatedBackend {
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once an armed read has taken its snapshot.
    pub async fn wait_for_read(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Backend for GatedBackend {
    async fn list_locations(&self, user: &User) -> Result<Vec<Location>, Error> {
        let snapshot = self.inner.list_locations(user).await?;

        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.gate.notified().await;
        }

        Ok(snapshot)
    }

    async fn add_location(&self, user: &User, location: &Location) -> Result<(), Error> {
        self.inner.add_location(user, location).await
    }

    async fn delete_location(&self, user: &User, id: Uuid) -> Result<(), Error> {
        self.inner.delete_location(user, id).await
    }

    async fn get_preferences(&self, user: &User) -> Result<Option<UserPreferences>, Error> {
        self.inner.get_preferences(user).await
    }

    async fn save_preferences(
        &self,
        user: &User,
        preferences: &UserPreferences,
    ) -> Result<(), Error> {
        self.inner.save_preferences(user, preferences).await
    }
}
