mod location_api;
mod map_api;
mod preferences_api;
mod route_api;
mod session_api;

use std::time::Duration;

use tokio::sync::{watch, Mutex};

use crate::{
    api::{MapSnapshot, API},
    auth::Session,
    config::Config,
    entities::{Coordinates, Location, MapLayer, RouteOption, Theme, UserPreferences},
    error::Error,
    external::DynDirections,
    map::{DynGeolocator, HeadlessMap, MapHost},
    panel::{AddLocationModal, Panel},
    routing::{RouteInfo, RouteOrchestrator, RouteRequest},
    store::{DynBackend, LocationStore},
};

/// All mutable application state. Only touched while holding the engine
/// lock, and the lock is never held across a network call.
struct AppState {
    session: Session,
    locations: LocationStore,
    preferences: UserPreferences,
    map: MapHost<HeadlessMap>,
    routes: RouteOrchestrator,
    panel: Panel,
    modal: AddLocationModal,
}

impl AppState {
    fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            state: self.map.state(),
            layer: self.map.layer(),
            theme: self.map.theme(),
            panel: self.panel,
            pending_location: self.modal.coordinates(),
            scene: self.map.surface().map(HeadlessMap::scene),
        }
    }

    /// Adds to the store and puts the marker on the map.
    fn add_location(&mut self, name: &str, coordinates: Coordinates) -> Result<Location, Error> {
        let location = self.locations.add(name, coordinates)?;
        self.map.reconcile_markers(self.locations.list());

        Ok(location)
    }

    /// Drops everything belonging to the signed-in user.
    fn forget_user_data(&mut self) {
        self.locations.clear();
        self.routes.reset(&mut self.map);
        self.modal.close();
        self.preferences = UserPreferences::default();
        self.map.reconcile_markers(&[]);
    }
}

pub struct Engine {
    state: Mutex<AppState>,
    directions: DynDirections,
    backend: DynBackend,
    geolocator: DynGeolocator,
    geolocation_timeout: Duration,
    route_updates: watch::Receiver<Option<RouteInfo>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(
        config: &Config,
        directions: DynDirections,
        backend: DynBackend,
        geolocator: DynGeolocator,
    ) -> Self {
        let routes = RouteOrchestrator::new();
        let route_updates = routes.subscribe();

        let state = AppState {
            session: Session::default(),
            locations: LocationStore::default(),
            preferences: UserPreferences::default(),
            map: MapHost::new(MapLayer::Map, Theme::Light, config.require_click_modifier),
            routes,
            panel: Panel::None,
            modal: AddLocationModal::default(),
        };

        Self {
            state: Mutex::new(state),
            directions,
            backend,
            geolocator,
            geolocation_timeout: config.geolocation_timeout,
            route_updates,
        }
    }

    /// Receives the displayed route's info every time it changes, `None`
    /// when no route is shown.
    pub fn route_updates(&self) -> watch::Receiver<Option<RouteInfo>> {
        self.route_updates.clone()
    }

    /// Runs a directions lookup outside the lock and applies the result if
    /// no newer request replaced it meanwhile.
    async fn run_route_request(&self, request: RouteRequest) -> Option<Vec<RouteOption>> {
        let result = self
            .directions
            .fetch_routes(
                request.start.coordinates,
                request.end.coordinates,
                request.mode,
            )
            .await;

        let mut state = self.state.lock().await;
        let AppState {
            routes, map, panel, ..
        } = &mut *state;

        routes.apply(&request, result, map, *panel)
    }

}

impl API for Engine {}
