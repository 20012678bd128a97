use super::{AppState, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::LocationAPI,
    entities::{Bounds, Coordinates, Location},
    error::{not_found_error, Error},
    map::{Padding, LOCATION_ZOOM},
};

const FIT_PADDING: f64 = 50.0;

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        let state = self.state.lock().await;
        state.session.require_user()?;

        Ok(state.locations.list().to_vec())
    }

    /// Adds the location in memory right away and persists it afterwards. A
    /// failed write is logged; the location stays.
    #[tracing::instrument(skip(self))]
    async fn add_location(&self, name: String, coordinates: Coordinates) -> Result<Location, Error> {
        let (user, location) = {
            let mut state = self.state.lock().await;
            let user = state.session.require_user()?.clone();
            let location = state.add_location(&name, coordinates)?;
            (user, location)
        };

        if let Err(err) = self.backend.add_location(&user, &location).await {
            tracing::error!("failed to persist location {}: {}", location.id, err);
        }

        Ok(location)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_location(&self, id: Uuid) -> Result<Location, Error> {
        let (user, location) = {
            let mut state = self.state.lock().await;
            let user = state.session.require_user()?.clone();

            let location = state.locations.delete(id)?;

            let AppState {
                locations,
                map,
                routes,
                ..
            } = &mut *state;

            routes.forget_location(id, map);
            map.reconcile_markers(locations.list());

            (user, location)
        };

        if let Err(err) = self.backend.delete_location(&user, id).await {
            tracing::error!("failed to delete location {}: {}", id, err);
        }

        Ok(location)
    }

    #[tracing::instrument(skip(self))]
    async fn select_location(&self, id: Uuid) -> Result<Location, Error> {
        let mut state = self.state.lock().await;
        state.session.require_user()?;

        let location = state.locations.find(id).cloned().ok_or_else(not_found_error)?;
        state.map.fly_to(location.coordinates, LOCATION_ZOOM);

        Ok(location)
    }

    #[tracing::instrument(skip(self))]
    async fn fit_to_all_locations(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        state.session.require_user()?;

        let points = state.locations.list().iter().map(|l| l.coordinates);
        if let Some(bounds) = Bounds::from_points(points) {
            state.map.fit_bounds(bounds, Padding::uniform(FIT_PADDING));
        }

        Ok(())
    }
}

