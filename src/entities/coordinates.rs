use geo_types::{coord, Coord, Point, Rect};
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair, serialized as `[lng, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coordinates: Coordinates) -> Self {
        [coordinates.lng, coordinates.lat]
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lng, coordinates.lat)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        coord! { x: coordinates.lng, y: coordinates.lat }
    }
}

/// Axis-aligned lng/lat bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds(Rect<f64>);

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter().filter(Coordinates::is_valid);
        let first: Coord<f64> = points.next()?.into();

        let (min, max) = points.fold((first, first), |(min, max), point| {
            (
                coord! { x: min.x.min(point.lng), y: min.y.min(point.lat) },
                coord! { x: max.x.max(point.lng), y: max.y.max(point.lat) },
            )
        });

        Some(Self(Rect::new(min, max)))
    }

    pub fn south_west(&self) -> Coordinates {
        let min = self.0.min();
        Coordinates::new(min.x, min.y)
    }

    pub fn north_east(&self) -> Coordinates {
        let max = self.0.max();
        Coordinates::new(max.x, max.y)
    }

    pub fn center(&self) -> Coordinates {
        let center = self.0.center();
        Coordinates::new(center.x, center.y)
    }
}

impl Serialize for Bounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.south_west(), self.north_east()].serialize(serializer)
    }
}
