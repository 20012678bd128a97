use super::{AppState, Engine};

use async_trait::async_trait;

use crate::{
    api::{MapAPI, MapSnapshot},
    entities::{Coordinates, Location, MapLayer, Theme},
    error::{invalid_state_error, Error},
    map::{locate_or_default, ClickEvent},
    panel::Panel,
};

#[async_trait]
impl MapAPI for Engine {
    /// Creates the map at the device position, or at the preferred default
    /// center when the position is unavailable or slow.
    #[tracing::instrument(skip(self))]
    async fn initialize_map(&self) -> Result<MapSnapshot, Error> {
        let (fallback, zoom) = {
            let mut state = self.state.lock().await;
            state.map.begin_initialize()?;
            (state.preferences.default_center, state.preferences.default_zoom)
        };

        let center =
            locate_or_default(self.geolocator.as_ref(), self.geolocation_timeout, fallback).await;

        let mut state = self.state.lock().await;
        state.map.complete_initialize(center, zoom)?;

        Ok(state.snapshot())
    }

    async fn map_snapshot(&self) -> MapSnapshot {
        self.state.lock().await.snapshot()
    }

    #[tracing::instrument(skip(self))]
    async fn handle_click(&self, event: ClickEvent) -> Option<Coordinates> {
        let mut state = self.state.lock().await;
        if !state.session.is_signed_in() {
            return None;
        }

        let coordinates = state.map.click(event)?;
        state.modal.open(coordinates);

        Some(coordinates)
    }

    /// Saves the clicked point under `name`. The modal stays open when the
    /// name is rejected.
    #[tracing::instrument(skip(self))]
    async fn confirm_pending_location(&self, name: String) -> Result<Location, Error> {
        let (user, location) = {
            let mut state = self.state.lock().await;
            let user = state.session.require_user()?.clone();
            let coordinates = state.modal.coordinates().ok_or_else(invalid_state_error)?;

            let location = state.add_location(&name, coordinates)?;
            state.modal.close();

            (user, location)
        };

        if let Err(err) = self.backend.add_location(&user, &location).await {
            tracing::error!("failed to persist location {}: {}", location.id, err);
        }

        Ok(location)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_pending_location(&self) -> Option<Coordinates> {
        self.state.lock().await.modal.close()
    }

    #[tracing::instrument(skip(self))]
    async fn change_style(&self, layer: Option<MapLayer>, theme: Option<Theme>) -> MapSnapshot {
        let mut state = self.state.lock().await;

        let layer = layer.unwrap_or_else(|| state.map.layer());
        let theme = theme.unwrap_or_else(|| state.map.theme());
        state.map.set_style(layer, theme);

        state.snapshot()
    }

    #[tracing::instrument(skip(self))]
    async fn style_loaded(&self) -> MapSnapshot {
        let mut state = self.state.lock().await;

        let locations = state.locations.list().to_vec();
        state.map.on_style_load(&locations);

        state.snapshot()
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_panel(&self, panel: Panel) -> Panel {
        let mut state = self.state.lock().await;

        state.panel = state.panel.toggle(panel);
        let panel = state.panel;

        let AppState { routes, map, .. } = &mut *state;
        routes.refit(map, panel);

        panel
    }

    #[tracing::instrument(skip(self))]
    async fn dispose_map(&self) {
        let mut state = self.state.lock().await;
        state.modal.close();
        state.map.dispose();
    }
}
