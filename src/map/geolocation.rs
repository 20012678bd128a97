use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    entities::Coordinates,
    error::{geolocation_error, Error},
};

#[async_trait]
pub trait Geolocator {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub type DynGeolocator = Arc<dyn Geolocator + Send + Sync>;

/// No position source is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl Geolocator for Unsupported {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Err(geolocation_error())
    }
}

/// A position known up front, e.g. from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Ok(self.0)
    }
}

/// Asks for the current position, falling back on failure or timeout.
#[tracing::instrument(skip(geolocator))]
pub async fn locate_or_default(
    geolocator: &(dyn Geolocator + Send + Sync),
    timeout: Duration,
    fallback: Coordinates,
) -> Coordinates {
    match tokio::time::timeout(timeout, geolocator.current_position()).await {
        Ok(Ok(position)) if position.is_valid() => position,
        Ok(Ok(position)) => {
            tracing::warn!("ignoring invalid position {:?}, using default", position);
            fallback
        }
        Ok(Err(err)) => {
            tracing::warn!("geolocation failed ({}), using default", err);
            fallback
        }
        Err(_) => {
            tracing::warn!("geolocation timed out after {:?}, using default", timeout);
            fallback
        }
    }
}
