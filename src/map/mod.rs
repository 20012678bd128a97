mod camera;
mod geolocation;
mod headless;
mod host;
mod markers;
mod style;
mod surface;

pub use camera::{Camera, Padding};
pub use geolocation::{locate_or_default, DynGeolocator, FixedPosition, Geolocator, Unsupported};
pub use headless::{HeadlessMap, Scene};
pub use host::{ClickEvent, MapHost, MapState};
pub use markers::{diff_markers, MarkerDelta};
pub use style::style_url;
pub use surface::{LineLayer, MapOptions, MapSurface};

pub const ROUTE_SOURCE_ID: &str = "route";
pub const ROUTE_LAYER_ID: &str = "route-line";
pub const LOCATION_ZOOM: f64 = 14.0;
