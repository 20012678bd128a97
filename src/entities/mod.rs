mod coordinates;
mod location;
mod preferences;
mod route;

pub use coordinates::{Bounds, Coordinates};
pub use location::Location;
pub use preferences::{MapLayer, Theme, UserPreferences};
pub use route::{RouteOption, RouteStep, TravelMode};
