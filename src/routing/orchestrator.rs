use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    entities::{Location, RouteOption, RouteStep, TravelMode},
    error::Error,
    map::{MapHost, MapSurface, Padding},
    panel::Panel,
};

const ROUTE_PADDING: f64 = 50.0;
const DIRECTIONS_PANEL_PADDING: f64 = 350.0;

/// Keeps the route clear of the directions panel on the left.
pub fn route_padding(panel: Panel) -> Padding {
    let mut padding = Padding::uniform(ROUTE_PADDING);

    if panel == Panel::Directions {
        padding.left = DIRECTIONS_PANEL_PADDING;
    }

    padding
}

/// A directions lookup handed out by the orchestrator. Its result is only
/// applied while `generation` is still the latest one.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub generation: u64,
    pub start: Location,
    pub end: Location,
    pub mode: TravelMode,
}

/// What listeners receive whenever the displayed route changes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteInfo {
    pub distance: f64,
    pub duration: f64,
    pub steps: Vec<RouteStep>,
    pub total_options: usize,
    pub current_index: usize,
    pub start: Location,
    pub end: Location,
    pub mode: TravelMode,
}

pub struct RouteOrchestrator {
    start: Option<Location>,
    end: Option<Location>,
    mode: TravelMode,
    routes: Vec<RouteOption>,
    current_index: usize,
    generation: u64,
    sender: watch::Sender<Option<RouteInfo>>,
    receiver: watch::Receiver<Option<RouteInfo>>,
}

impl Default for RouteOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteOrchestrator {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(None);

        Self {
            start: None,
            end: None,
            mode: TravelMode::default(),
            routes: vec![],
            current_index: 0,
            generation: 0,
            sender,
            receiver,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RouteInfo>> {
        self.receiver.clone()
    }

    pub fn start(&self) -> Option<&Location> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Location> {
        self.end.as_ref()
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn routes(&self) -> &[RouteOption] {
        &self.routes
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_route(&self) -> Option<&RouteOption> {
        self.routes.get(self.current_index)
    }

    pub fn info(&self) -> Option<RouteInfo> {
        let route = self.current_route()?;

        Some(RouteInfo {
            distance: route.distance,
            duration: route.duration,
            steps: route.steps.clone(),
            total_options: self.routes.len(),
            current_index: self.current_index,
            start: self.start.clone()?,
            end: self.end.clone()?,
            mode: self.mode,
        })
    }

    fn publish(&self) {
        // the orchestrator holds a receiver itself, so this cannot fail
        let _ = self.sender.send(self.info());
    }

    fn next_request(&mut self) -> Option<RouteRequest> {
        let start = self.start.clone()?;
        let end = self.end.clone()?;

        self.generation += 1;

        Some(RouteRequest {
            generation: self.generation,
            start,
            end,
            mode: self.mode,
        })
    }

    /// Updates the route inputs. Returns a request when something changed
    /// and both endpoints are set; routes are recalculated automatically.
    pub fn set_endpoints<S: MapSurface>(
        &mut self,
        start: Option<Location>,
        end: Option<Location>,
        mode: TravelMode,
        map: &mut MapHost<S>,
    ) -> Option<RouteRequest> {
        let same_id = |a: &Option<Location>, b: &Option<Location>| {
            a.as_ref().map(|l| l.id) == b.as_ref().map(|l| l.id)
        };

        if same_id(&self.start, &start) && same_id(&self.end, &end) && self.mode == mode {
            return None;
        }

        self.start = start;
        self.end = end;
        self.mode = mode;
        self.clear(map);

        self.next_request()
    }

    /// Sets the inputs and always returns a fresh request, even if nothing
    /// changed.
    pub fn compute<S: MapSurface>(
        &mut self,
        start: Location,
        end: Location,
        mode: TravelMode,
        map: &mut MapHost<S>,
    ) -> RouteRequest {
        self.start = Some(start.clone());
        self.end = Some(end.clone());
        self.mode = mode;
        self.clear(map);

        self.generation += 1;

        RouteRequest {
            generation: self.generation,
            start,
            end,
            mode,
        }
    }

    /// Applies a directions result. Returns `None` when the request was
    /// superseded, otherwise the stored alternatives (empty when no route
    /// was found or the lookup failed).
    #[tracing::instrument(skip_all, fields(generation = request.generation))]
    pub fn apply<S: MapSurface>(
        &mut self,
        request: &RouteRequest,
        result: Result<Vec<RouteOption>, Error>,
        map: &mut MapHost<S>,
        panel: Panel,
    ) -> Option<Vec<RouteOption>> {
        if request.generation != self.generation {
            tracing::debug!("dropping superseded route response");
            return None;
        }

        let routes = match result {
            Ok(routes) => routes,
            Err(err) => {
                tracing::warn!("route lookup failed: {}", err);
                vec![]
            }
        };

        if routes.is_empty() {
            tracing::info!(
                "no route from {} to {} ({:?})",
                request.start.name,
                request.end.name,
                request.mode
            );
            self.clear(map);
            return Some(vec![]);
        }

        self.routes = routes;
        self.current_index = 0;
        self.display(map, panel);

        Some(self.routes.clone())
    }

    /// Wraps `index` into range in both directions. Returns the selected
    /// index, or `None` when there are no routes.
    pub fn select_route_index<S: MapSurface>(
        &mut self,
        index: i64,
        map: &mut MapHost<S>,
        panel: Panel,
    ) -> Option<usize> {
        if self.routes.is_empty() {
            return None;
        }

        let len = self.routes.len() as i64;
        self.current_index = index.rem_euclid(len) as usize;
        self.display(map, panel);

        Some(self.current_index)
    }

    pub fn next_route<S: MapSurface>(&mut self, map: &mut MapHost<S>, panel: Panel) -> Option<usize> {
        self.select_route_index(self.current_index as i64 + 1, map, panel)
    }

    pub fn previous_route<S: MapSurface>(
        &mut self,
        map: &mut MapHost<S>,
        panel: Panel,
    ) -> Option<usize> {
        self.select_route_index(self.current_index as i64 - 1, map, panel)
    }

    /// Fits the viewport to the displayed route again, e.g. after a panel
    /// opened or closed.
    pub fn refit<S: MapSurface>(&self, map: &mut MapHost<S>, panel: Panel) {
        if let Some(bounds) = self.current_route().and_then(RouteOption::bounds) {
            map.fit_bounds(bounds, route_padding(panel));
        }
    }

    fn display<S: MapSurface>(&mut self, map: &mut MapHost<S>, panel: Panel) {
        if let Some(route) = self.current_route() {
            map.show_route(&route.geometry, self.mode.line_color());
        }

        self.refit(map, panel);
        self.publish();
    }

    /// Drops the displayed route and outdates any request in flight.
    pub fn clear<S: MapSurface>(&mut self, map: &mut MapHost<S>) {
        self.generation += 1;
        self.routes.clear();
        self.current_index = 0;
        map.clear_route();
        self.publish();
    }

    /// Called when a location is deleted. Clears the endpoint and the route
    /// if the location was one of the endpoints.
    pub fn forget_location<S: MapSurface>(&mut self, id: Uuid, map: &mut MapHost<S>) -> bool {
        let mut forgotten = false;

        if self.start.as_ref().map(|l| l.id) == Some(id) {
            self.start = None;
            forgotten = true;
        }
        if self.end.as_ref().map(|l| l.id) == Some(id) {
            self.end = None;
            forgotten = true;
        }

        if forgotten {
            self.clear(map);
        }

        forgotten
    }

    pub fn reset<S: MapSurface>(&mut self, map: &mut MapHost<S>) {
        self.start = None;
        self.end = None;
        self.clear(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Coordinates, MapLayer, Theme};
    use crate::error::upstream_error;
    use crate::map::{HeadlessMap, ROUTE_LAYER_ID};
    use crate::test_utils::route_option;

    fn loaded_map() -> MapHost<HeadlessMap> {
        let mut map = MapHost::new(MapLayer::Map, Theme::Light, false);
        map.begin_initialize().unwrap();
        map.complete_initialize(Coordinates::new(0.0, 0.0), 12.0)
            .unwrap();
        map.on_style_load(&[]);
        map
    }

    fn endpoints() -> (Location, Location) {
        (
            Location::new("A".into(), Coordinates::new(0.0, 0.0)),
            Location::new("B".into(), Coordinates::new(1.0, 1.0)),
        )
    }

    fn alternatives(n: usize) -> Vec<RouteOption> {
        (0..n)
            .map(|i| route_option(i, 500.0 + 150.0 * i as f64, 0.1 * i as f64))
            .collect()
    }

    fn displayed(map: &MapHost<HeadlessMap>) -> Vec<Coordinates> {
        map.surface()
            .unwrap()
            .line(ROUTE_LAYER_ID)
            .unwrap()
            .coordinates
            .clone()
    }

    #[test]
    fn index_always_wraps_into_range() {
        let mut map = loaded_map();
        let (a, b) = endpoints();

        for n in 1..=4 {
            let mut routes = RouteOrchestrator::new();
            let request = routes.compute(a.clone(), b.clone(), TravelMode::Walking, &mut map);
            routes.apply(&request, Ok(alternatives(n)), &mut map, Panel::None);

            for i in -10..10 {
                let selected = routes.select_route_index(i, &mut map, Panel::None).unwrap();
                assert!(selected < n);
                assert_eq!(selected, i.rem_euclid(n as i64) as usize);
                assert_eq!(routes.current_index(), selected);
            }
        }
    }

    #[test]
    fn displays_first_alternative_and_cycles_back() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();
        let options = alternatives(3);

        let request = routes.compute(a, b, TravelMode::Walking, &mut map);
        let stored = routes
            .apply(&request, Ok(options.clone()), &mut map, Panel::None)
            .unwrap();

        assert_eq!(stored, options);
        assert_eq!(routes.current_index(), 0);
        assert_eq!(displayed(&map), options[0].geometry);

        for _ in 0..options.len() {
            routes.next_route(&mut map, Panel::None);
        }
        assert_eq!(routes.current_index(), 0);
        assert_eq!(displayed(&map), options[0].geometry);

        routes.previous_route(&mut map, Panel::None);
        assert_eq!(routes.current_index(), 2);
        assert_eq!(displayed(&map), options[2].geometry);
    }

    #[test]
    fn failure_and_empty_results_clear_the_route() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();
        let updates = routes.subscribe();

        let request = routes.compute(a.clone(), b.clone(), TravelMode::Walking, &mut map);
        routes.apply(&request, Ok(alternatives(2)), &mut map, Panel::None);
        assert!(updates.borrow().is_some());

        let request = routes.compute(a.clone(), b.clone(), TravelMode::Driving, &mut map);
        let stored = routes
            .apply(&request, Err(upstream_error()), &mut map, Panel::None)
            .unwrap();
        assert!(stored.is_empty());
        assert!(displayed(&map).is_empty());
        assert!(updates.borrow().is_none());

        let request = routes.compute(a, b, TravelMode::Cycling, &mut map);
        routes.apply(&request, Ok(vec![]), &mut map, Panel::None);
        assert!(routes.info().is_none());
        assert_eq!(routes.select_route_index(1, &mut map, Panel::None), None);
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();

        let walking = routes.compute(a.clone(), b.clone(), TravelMode::Walking, &mut map);
        let driving = routes.compute(a, b, TravelMode::Driving, &mut map);

        let newest = alternatives(1);
        routes.apply(&driving, Ok(newest.clone()), &mut map, Panel::None);
        assert_eq!(
            routes.apply(&walking, Ok(alternatives(3)), &mut map, Panel::None),
            None
        );

        assert_eq!(routes.routes(), newest.as_slice());
        assert_eq!(routes.info().unwrap().mode, TravelMode::Driving);
    }

    #[test]
    fn recalculates_only_when_inputs_change() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();

        assert!(routes
            .set_endpoints(Some(a.clone()), None, TravelMode::Walking, &mut map)
            .is_none());

        let request = routes
            .set_endpoints(Some(a.clone()), Some(b.clone()), TravelMode::Walking, &mut map)
            .unwrap();
        routes.apply(&request, Ok(alternatives(2)), &mut map, Panel::None);

        assert!(routes
            .set_endpoints(Some(a.clone()), Some(b.clone()), TravelMode::Walking, &mut map)
            .is_none());
        assert_eq!(routes.routes().len(), 2);

        let request = routes
            .set_endpoints(Some(a), Some(b), TravelMode::Cycling, &mut map)
            .unwrap();
        assert_eq!(request.mode, TravelMode::Cycling);
        assert!(routes.routes().is_empty());
    }

    #[test]
    fn route_line_uses_mode_color() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();

        let request = routes.compute(a, b, TravelMode::Cycling, &mut map);
        routes.apply(&request, Ok(alternatives(1)), &mut map, Panel::None);

        let line = map.surface().unwrap().line(ROUTE_LAYER_ID).unwrap();
        assert_eq!(line.layer.color, TravelMode::Cycling.line_color());
    }

    #[test]
    fn fit_leaves_room_for_directions_panel() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();

        let request = routes.compute(a, b, TravelMode::Walking, &mut map);
        routes.apply(&request, Ok(alternatives(1)), &mut map, Panel::Directions);
        let fit = map.surface().unwrap().scene().last_fit.unwrap();
        assert_eq!(fit.padding.left, 350.0);
        assert_eq!(fit.padding.right, 50.0);

        routes.refit(&mut map, Panel::None);
        let fit = map.surface().unwrap().scene().last_fit.unwrap();
        assert_eq!(fit.padding, Padding::uniform(50.0));
    }

    #[test]
    fn forgetting_an_endpoint_clears_the_route() {
        let mut map = loaded_map();
        let (a, b) = endpoints();
        let mut routes = RouteOrchestrator::new();

        let request = routes.compute(a.clone(), b.clone(), TravelMode::Walking, &mut map);
        routes.apply(&request, Ok(alternatives(2)), &mut map, Panel::None);

        assert!(!routes.forget_location(Uuid::new_v4(), &mut map));
        assert_eq!(routes.routes().len(), 2);

        assert!(routes.forget_location(b.id, &mut map));
        assert!(routes.end().is_none());
        assert_eq!(routes.start(), Some(&a));
        assert!(routes.info().is_none());
        assert!(displayed(&map).is_empty());
    }
}
