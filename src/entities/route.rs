use serde::{Deserialize, Serialize};

use crate::entities::{Bounds, Coordinates};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
    Driving,
}

impl TravelMode {
    /// Directions API routing profile.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Walking => "mapbox/walking",
            Self::Cycling => "mapbox/cycling",
            Self::Driving => "mapbox/driving",
        }
    }

    pub fn line_color(&self) -> &'static str {
        match self {
            Self::Walking => "#15a451",
            Self::Cycling => "#8c31b1",
            Self::Driving => "#1e7fbf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
            Self::Driving => "Driving",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    /// meters
    pub distance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub index: usize,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    pub steps: Vec<RouteStep>,
    pub geometry: Vec<Coordinates>,
}

impl RouteOption {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.geometry.iter().copied())
    }
}

#[test]
fn travel_mode_profiles() {
    assert_eq!(TravelMode::default(), TravelMode::Walking);
    assert_eq!(TravelMode::Cycling.profile(), "mapbox/cycling");
    assert_eq!(
        serde_json::to_string(&TravelMode::Driving).unwrap(),
        "\"driving\""
    );
}
