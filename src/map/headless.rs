use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    entities::{Bounds, Coordinates},
    error::{invalid_state_error, not_found_error, Error},
    map::{Camera, LineLayer, MapOptions, MapSurface, Padding},
};

const TILE_SIZE: f64 = 512.0;
const MAX_ZOOM: f64 = 22.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    #[serde(flatten)]
    pub layer: LineLayer,
    pub coordinates: Vec<Coordinates>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub id: Uuid,
    pub coordinates: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitRequest {
    pub bounds: Bounds,
    pub padding: Padding,
}

/// Everything a browser needs to reproduce the map on its SDK instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub style_url: String,
    pub style_loaded: bool,
    pub camera: Camera,
    pub last_fit: Option<FitRequest>,
    pub lines: Vec<Line>,
    pub markers: Vec<Marker>,
}

/// A retained map surface. It keeps the scene in memory with the same
/// lifecycle rules as a browser map and never draws anything.
#[derive(Clone, Debug)]
pub struct HeadlessMap {
    style_url: String,
    style_loaded: bool,
    camera: Camera,
    viewport: (f64, f64),
    last_fit: Option<FitRequest>,
    lines: Vec<Line>,
    markers: HashMap<Uuid, Coordinates>,
    destroyed: bool,
}

impl HeadlessMap {
    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|line| line.layer.id == id)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn scene(&self) -> Scene {
        let mut markers: Vec<Marker> = self
            .markers
            .iter()
            .map(|(id, coordinates)| Marker {
                id: *id,
                coordinates: *coordinates,
            })
            .collect();
        markers.sort_by_key(|marker| marker.id);

        Scene {
            style_url: self.style_url.clone(),
            style_loaded: self.style_loaded,
            camera: self.camera,
            last_fit: self.last_fit,
            lines: self.lines.clone(),
            markers,
        }
    }

    fn line_mut(&mut self, id: &str) -> Result<&mut Line, Error> {
        if !self.style_loaded {
            return Err(invalid_state_error());
        }

        self.lines
            .iter_mut()
            .find(|line| line.layer.id == id)
            .ok_or_else(not_found_error)
    }

    /// Largest zoom at which `bounds` fits inside the padded viewport.
    fn fit_zoom(&self, bounds: &Bounds, padding: &Padding) -> f64 {
        let (width, height) = self.viewport;
        let available_width = (width - padding.left - padding.right).max(1.0);
        let available_height = (height - padding.top - padding.bottom).max(1.0);

        let (west, south) = project(bounds.south_west());
        let (east, north) = project(bounds.north_east());
        let span_x = (east - west).abs() * TILE_SIZE;
        let span_y = (south - north).abs() * TILE_SIZE;

        let zoom_x = if span_x > 0.0 {
            (available_width / span_x).log2()
        } else {
            MAX_ZOOM
        };
        let zoom_y = if span_y > 0.0 {
            (available_height / span_y).log2()
        } else {
            MAX_ZOOM
        };

        zoom_x.min(zoom_y).clamp(0.0, MAX_ZOOM)
    }
}

/// Web Mercator position in world units, both axes in `[0, 1]`.
fn project(coordinates: Coordinates) -> (f64, f64) {
    let x = (coordinates.lng + 180.0) / 360.0;
    let lat = coordinates.lat.clamp(-85.051_129, 85.051_129).to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0;

    (x, y)
}

impl MapSurface for HeadlessMap {
    fn create(options: MapOptions) -> Self {
        Self {
            style_url: options.style_url,
            style_loaded: false,
            camera: options.camera,
            viewport: (1024.0, 768.0),
            last_fit: None,
            lines: vec![],
            markers: HashMap::new(),
            destroyed: false,
        }
    }

    fn destroy(&mut self) {
        self.lines.clear();
        self.markers.clear();
        self.style_loaded = false;
        self.destroyed = true;
    }

    fn style_url(&self) -> &str {
        &self.style_url
    }

    fn set_style(&mut self, url: &str) {
        self.style_url = url.into();
        self.style_loaded = false;
        self.lines.clear();
        self.markers.clear();
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn mark_style_loaded(&mut self) {
        if !self.destroyed {
            self.style_loaded = true;
        }
    }

    fn camera(&self) -> Camera {
        self.camera
    }

    fn jump_to(&mut self, camera: Camera) {
        self.camera = camera;
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        self.camera = Camera {
            center,
            zoom: zoom.clamp(0.0, MAX_ZOOM),
        };
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        self.camera = Camera {
            center: bounds.center(),
            zoom: self.fit_zoom(&bounds, &padding),
        };
        self.last_fit = Some(FitRequest { bounds, padding });
    }

    fn has_line_layer(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    fn add_line_layer(&mut self, layer: LineLayer) -> Result<(), Error> {
        if !self.style_loaded || self.has_line_layer(&layer.id) {
            return Err(invalid_state_error());
        }

        self.lines.push(Line {
            layer,
            coordinates: vec![],
        });

        Ok(())
    }

    fn set_line_data(&mut self, id: &str, coordinates: &[Coordinates]) -> Result<(), Error> {
        self.line_mut(id)?.coordinates = coordinates.to_vec();
        Ok(())
    }

    fn set_line_color(&mut self, id: &str, color: &str) -> Result<(), Error> {
        self.line_mut(id)?.layer.color = color.into();
        Ok(())
    }

    fn markers(&self) -> HashMap<Uuid, Coordinates> {
        self.markers.clone()
    }

    fn add_marker(&mut self, id: Uuid, coordinates: Coordinates) {
        if !self.destroyed {
            self.markers.insert(id, coordinates);
        }
    }

    fn remove_marker(&mut self, id: Uuid) {
        self.markers.remove(&id);
    }
}
