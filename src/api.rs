use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::User,
    entities::{Coordinates, Location, MapLayer, RouteOption, Theme, TravelMode, UserPreferences},
    error::Error,
    map::{ClickEvent, MapState, Scene},
    panel::Panel,
    routing::RouteInfo,
};

/// Everything the browser renders from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub state: MapState,
    pub layer: MapLayer,
    pub theme: Theme,
    pub panel: Panel,
    pub pending_location: Option<Coordinates>,
    pub scene: Option<Scene>,
}

#[async_trait]
pub trait SessionAPI {
    async fn sign_in(&self, user: User) -> Result<Vec<Location>, Error>;
    async fn sign_out(&self) -> Result<(), Error>;
    async fn current_user(&self) -> Option<User>;
}

#[async_trait]
pub trait LocationAPI {
    async fn list_locations(&self) -> Result<Vec<Location>, Error>;
    async fn add_location(&self, name: String, coordinates: Coordinates)
        -> Result<Location, Error>;
    async fn delete_location(&self, id: Uuid) -> Result<Location, Error>;
    async fn select_location(&self, id: Uuid) -> Result<Location, Error>;
    async fn fit_to_all_locations(&self) -> Result<(), Error>;
}

#[async_trait]
pub trait MapAPI {
    async fn initialize_map(&self) -> Result<MapSnapshot, Error>;
    async fn map_snapshot(&self) -> MapSnapshot;
    async fn handle_click(&self, event: ClickEvent) -> Option<Coordinates>;
    async fn confirm_pending_location(&self, name: String) -> Result<Location, Error>;
    async fn cancel_pending_location(&self) -> Option<Coordinates>;
    async fn change_style(&self, layer: Option<MapLayer>, theme: Option<Theme>) -> MapSnapshot;
    async fn style_loaded(&self) -> MapSnapshot;
    async fn toggle_panel(&self, panel: Panel) -> Panel;
    async fn dispose_map(&self);
}

#[async_trait]
pub trait RouteAPI {
    /// Updates start/end/mode; routes are recalculated when both endpoints
    /// are set and anything changed.
    async fn set_route(
        &self,
        start: Option<Uuid>,
        end: Option<Uuid>,
        mode: TravelMode,
    ) -> Result<Option<RouteInfo>, Error>;
    async fn compute_routes(
        &self,
        start: Uuid,
        end: Uuid,
        mode: TravelMode,
    ) -> Result<Vec<RouteOption>, Error>;
    async fn select_route_index(&self, index: i64) -> Option<RouteInfo>;
    async fn next_route(&self) -> Option<RouteInfo>;
    async fn previous_route(&self) -> Option<RouteInfo>;
    async fn current_route(&self) -> Option<RouteInfo>;
}

#[async_trait]
pub trait PreferencesAPI {
    async fn get_preferences(&self) -> Result<UserPreferences, Error>;
    async fn save_preferences(&self, preferences: UserPreferences)
        -> Result<UserPreferences, Error>;
}

pub trait API: SessionAPI + LocationAPI + MapAPI + RouteAPI + PreferencesAPI {}
