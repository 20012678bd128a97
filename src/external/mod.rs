pub mod mapbox;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, RouteOption, TravelMode},
    error::Error,
};

/// Source of route alternatives between two points.
#[async_trait]
pub trait DirectionsProvider {
    async fn fetch_routes(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<Vec<RouteOption>, Error>;
}

pub type DynDirections = Arc<dyn DirectionsProvider + Send + Sync>;
