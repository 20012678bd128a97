use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    entities::{Bounds, Coordinates},
    error::Error,
    map::{Camera, Padding},
};

pub struct MapOptions {
    pub style_url: String,
    pub camera: Camera,
}

/// A GeoJSON line source together with the line layer drawing it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineLayer {
    pub id: String,
    pub source: String,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

/// The mapping SDK boundary.
///
/// Sources, layers and markers are owned by the current style: `set_style`
/// drops all of them, and layer mutations fail until the surface reports the
/// new style as loaded.
pub trait MapSurface {
    fn create(options: MapOptions) -> Self
    where
        Self: Sized;

    fn destroy(&mut self);

    fn style_url(&self) -> &str;
    fn set_style(&mut self, url: &str);
    fn is_style_loaded(&self) -> bool;
    /// Records the SDK's style load event.
    fn mark_style_loaded(&mut self);

    fn camera(&self) -> Camera;
    fn jump_to(&mut self, camera: Camera);
    fn fly_to(&mut self, center: Coordinates, zoom: f64);
    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding);

    fn has_line_layer(&self, id: &str) -> bool;
    fn add_line_layer(&mut self, layer: LineLayer) -> Result<(), Error>;
    fn set_line_data(&mut self, id: &str, coordinates: &[Coordinates]) -> Result<(), Error>;
    fn set_line_color(&mut self, id: &str, color: &str) -> Result<(), Error>;

    fn markers(&self) -> HashMap<Uuid, Coordinates>;
    fn add_marker(&mut self, id: Uuid, coordinates: Coordinates);
    fn remove_marker(&mut self, id: Uuid);
}
