use serde::{Deserialize, Serialize};

use crate::{
    entities::{Bounds, Coordinates, Location, MapLayer, Theme},
    error::{invalid_state_error, Error},
    map::{
        diff_markers, style_url, Camera, LineLayer, MapOptions, MapSurface, MarkerDelta, Padding,
        ROUTE_LAYER_ID, ROUTE_SOURCE_ID,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapState {
    Uninitialized,
    Initializing,
    Ready,
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub modifier: bool,
}

/// The route line the map should show, kept so it can be redrawn after a
/// style swap.
#[derive(Clone, Debug, PartialEq)]
struct RouteLine {
    coordinates: Vec<Coordinates>,
    color: String,
}

pub struct MapHost<S> {
    state: MapState,
    surface: Option<S>,
    layer: MapLayer,
    theme: Theme,
    route: Option<RouteLine>,
    restore_camera: Option<Camera>,
    require_modifier: bool,
}

impl<S: MapSurface> MapHost<S> {
    pub fn new(layer: MapLayer, theme: Theme, require_modifier: bool) -> Self {
        Self {
            state: MapState::Uninitialized,
            surface: None,
            layer,
            theme,
            route: None,
            restore_camera: None,
            require_modifier,
        }
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn layer(&self) -> MapLayer {
        self.layer
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn ready_surface(&mut self) -> Option<&mut S> {
        match self.state {
            MapState::Ready => self.surface.as_mut(),
            _ => None,
        }
    }

    fn loaded_surface(&mut self) -> Option<&mut S> {
        self.ready_surface()
            .filter(|surface| surface.is_style_loaded())
    }

    pub fn begin_initialize(&mut self) -> Result<(), Error> {
        match self.state {
            MapState::Uninitialized => {
                self.state = MapState::Initializing;
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    /// Builds the surface once the initial center is known. The style still
    /// has to report itself loaded before layers and markers appear.
    #[tracing::instrument(skip(self))]
    pub fn complete_initialize(&mut self, center: Coordinates, zoom: f64) -> Result<(), Error> {
        if self.state != MapState::Initializing {
            return Err(invalid_state_error());
        }

        self.surface = Some(S::create(MapOptions {
            style_url: style_url(self.layer, self.theme).into(),
            camera: Camera { center, zoom },
        }));
        self.state = MapState::Ready;

        tracing::info!("map ready");

        Ok(())
    }

    /// Swaps the style if `layer`/`theme` resolve to a different one. The
    /// camera is captured now and restored when the new style loads.
    #[tracing::instrument(skip(self))]
    pub fn set_style(&mut self, layer: MapLayer, theme: Theme) {
        self.layer = layer;
        self.theme = theme;

        let url = style_url(layer, theme);
        let Some(surface) = self.ready_surface() else {
            return;
        };

        if surface.style_url() == url {
            return;
        }

        let camera = surface.camera();
        surface.set_style(url);

        // a second swap before the first finished keeps the original camera
        if self.restore_camera.is_none() {
            self.restore_camera = Some(camera);
        }
    }

    /// Handles the surface's style load event: restores the camera, redraws
    /// the route layer and re-adds every marker.
    #[tracing::instrument(skip_all)]
    pub fn on_style_load(&mut self, locations: &[Location]) {
        let restore_camera = self.restore_camera.take();

        let Some(surface) = self.ready_surface() else {
            return;
        };

        surface.mark_style_loaded();

        if let Some(camera) = restore_camera {
            surface.jump_to(camera);
        }

        self.sync_route_layer();
        self.reconcile_markers(locations);
    }

    fn sync_route_layer(&mut self) {
        let route = self.route.clone();
        let Some(surface) = self.loaded_surface() else {
            return;
        };

        let (coordinates, color) = match &route {
            Some(route) => (route.coordinates.as_slice(), route.color.as_str()),
            None => (&[][..], "#4264fb"),
        };

        if !surface.has_line_layer(ROUTE_LAYER_ID) {
            let layer = LineLayer {
                id: ROUTE_LAYER_ID.into(),
                source: ROUTE_SOURCE_ID.into(),
                color: color.into(),
                width: 4.0,
                opacity: 0.8,
            };

            if let Err(err) = surface.add_line_layer(layer) {
                tracing::error!("failed to add route layer: {}", err);
                return;
            }
        }

        let result = surface
            .set_line_color(ROUTE_LAYER_ID, color)
            .and_then(|_| surface.set_line_data(ROUTE_LAYER_ID, coordinates));

        if let Err(err) = result {
            tracing::error!("failed to update route layer: {}", err);
        }
    }

    /// Replaces the route line. Drawn now if the style is loaded, otherwise
    /// on the next style load.
    pub fn show_route(&mut self, coordinates: &[Coordinates], color: &str) {
        self.route = Some(RouteLine {
            coordinates: coordinates.to_vec(),
            color: color.into(),
        });
        self.sync_route_layer();
    }

    pub fn clear_route(&mut self) {
        self.route = None;
        self.sync_route_layer();
    }

    pub fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        if let Some(surface) = self.ready_surface() {
            surface.fit_bounds(bounds, padding);
        }
    }

    pub fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        if let Some(surface) = self.ready_surface() {
            surface.fly_to(center, zoom);
        }
    }

    /// Issues only the marker additions and removals needed to match
    /// `locations`. Skipped while the style is loading.
    pub fn reconcile_markers(&mut self, locations: &[Location]) -> MarkerDelta {
        let Some(surface) = self.loaded_surface() else {
            return MarkerDelta::default();
        };

        let delta = diff_markers(locations, &surface.markers());

        for id in &delta.remove {
            surface.remove_marker(*id);
        }
        for (id, coordinates) in &delta.add {
            surface.add_marker(*id, *coordinates);
        }

        if !delta.is_empty() {
            tracing::debug!(
                "markers: {} added, {} removed",
                delta.add.len(),
                delta.remove.len()
            );
        }

        delta
    }

    /// The coordinate to pre-fill the add-location flow with, if this click
    /// should open it.
    pub fn click(&self, event: ClickEvent) -> Option<Coordinates> {
        if self.state != MapState::Ready || !event.coordinates.is_valid() {
            return None;
        }

        if self.require_modifier && !event.modifier {
            return None;
        }

        Some(event.coordinates)
    }

    #[tracing::instrument(skip(self))]
    pub fn dispose(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            for id in surface.markers().into_keys() {
                surface.remove_marker(id);
            }
            surface.destroy();
        }

        self.route = None;
        self.restore_camera = None;
        self.state = MapState::Disposed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeadlessMap;

    fn ready_host() -> MapHost<HeadlessMap> {
        let mut host = MapHost::new(MapLayer::Map, Theme::Light, false);
        host.begin_initialize().unwrap();
        host.complete_initialize(Coordinates::new(144.9631, -37.8136), 12.0)
            .unwrap();
        host
    }

    fn locations() -> Vec<Location> {
        vec![
            Location::new("A".into(), Coordinates::new(144.96, -37.81)),
            Location::new("B".into(), Coordinates::new(144.97, -37.82)),
        ]
    }

    #[test]
    fn lifecycle() {
        let mut host: MapHost<HeadlessMap> = MapHost::new(MapLayer::Map, Theme::Light, false);
        assert_eq!(host.state(), MapState::Uninitialized);
        assert!(host
            .complete_initialize(Coordinates::new(0.0, 0.0), 1.0)
            .is_err());

        host.begin_initialize().unwrap();
        assert_eq!(host.state(), MapState::Initializing);
        assert!(host.begin_initialize().is_err());

        host.complete_initialize(Coordinates::new(0.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(host.state(), MapState::Ready);

        host.dispose();
        assert_eq!(host.state(), MapState::Disposed);
        assert!(host.surface().unwrap().is_destroyed());
        assert!(host.begin_initialize().is_err());
    }

    #[test]
    fn style_change_preserves_camera_and_markers() {
        let mut host = ready_host();
        let locations = locations();
        host.on_style_load(&locations);
        host.show_route(&[Coordinates::new(144.96, -37.81)], "#15a451");

        host.fly_to(Coordinates::new(144.965, -37.815), 13.5);
        let before = host.surface().unwrap().camera();
        let markers_before = host.surface().unwrap().markers();

        host.set_style(MapLayer::Satellite, Theme::Light);
        assert!(host.surface().unwrap().markers().is_empty());

        // the camera drifts while the new style streams in
        host.fly_to(Coordinates::new(0.0, 0.0), 2.0);
        host.on_style_load(&locations);

        let surface = host.surface().unwrap();
        let after = surface.camera();
        assert!((after.center.lng - before.center.lng).abs() < 1e-9);
        assert!((after.center.lat - before.center.lat).abs() < 1e-9);
        assert!((after.zoom - before.zoom).abs() < 1e-9);
        assert_eq!(surface.markers(), markers_before);

        let line = surface.line(ROUTE_LAYER_ID).unwrap();
        assert_eq!(line.coordinates, vec![Coordinates::new(144.96, -37.81)]);
        assert_eq!(line.layer.color, "#15a451");
    }

    #[test]
    fn same_style_is_not_reloaded() {
        let mut host = ready_host();
        host.on_style_load(&locations());

        host.set_style(MapLayer::Map, Theme::Light);
        assert!(host.surface().unwrap().is_style_loaded());

        host.set_style(MapLayer::Satellite, Theme::Light);
        host.on_style_load(&locations());
        host.set_style(MapLayer::Satellite, Theme::Dark);
        assert!(host.surface().unwrap().is_style_loaded());
        assert_eq!(host.theme(), Theme::Dark);
    }

    #[test]
    fn route_waits_for_style_load() {
        let mut host = ready_host();
        host.show_route(&[Coordinates::new(1.0, 1.0)], "#1e7fbf");
        assert!(!host.surface().unwrap().has_line_layer(ROUTE_LAYER_ID));

        host.on_style_load(&[]);
        let line = host.surface().unwrap().line(ROUTE_LAYER_ID).unwrap();
        assert_eq!(line.coordinates.len(), 1);

        host.clear_route();
        let line = host.surface().unwrap().line(ROUTE_LAYER_ID).unwrap();
        assert!(line.coordinates.is_empty());
    }

    #[test]
    fn reconcile_issues_deltas_only() {
        let mut host = ready_host();
        let mut locations = locations();
        host.on_style_load(&locations);

        let removed = locations.remove(0);
        let delta = host.reconcile_markers(&locations);

        assert_eq!(delta.remove, vec![removed.id]);
        assert!(delta.add.is_empty());
        assert_eq!(host.surface().unwrap().markers().len(), 1);
    }

    #[test]
    fn click_respects_modifier_setting() {
        let event = ClickEvent {
            coordinates: Coordinates::new(1.0, 2.0),
            modifier: false,
        };

        let host = ready_host();
        assert_eq!(host.click(event), Some(Coordinates::new(1.0, 2.0)));

        let mut gated: MapHost<HeadlessMap> = MapHost::new(MapLayer::Map, Theme::Light, true);
        assert_eq!(gated.click(event), None);
        gated.begin_initialize().unwrap();
        gated
            .complete_initialize(Coordinates::new(0.0, 0.0), 12.0)
            .unwrap();
        assert_eq!(gated.click(event), None);
        assert_eq!(
            gated.click(ClickEvent {
                modifier: true,
                ..event
            }),
            Some(Coordinates::new(1.0, 2.0))
        );
    }
}
