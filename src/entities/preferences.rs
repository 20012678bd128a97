use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lng: 144.9631,
    lat: -37.8136,
};
pub const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    Map,
    Satellite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub default_map_layer: MapLayer,
    pub default_center: Coordinates,
    pub default_zoom: f64,
    pub weather_layer_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_map_layer: MapLayer::Map,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            weather_layer_enabled: false,
        }
    }
}
