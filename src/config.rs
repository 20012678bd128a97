use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::{
    entities::Coordinates,
    error::{configuration_error, Error},
};

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub mapbox_api_base: String,
    pub mapbox_access_token: String,
    pub geolocation_timeout: Duration,
    pub initial_position: Option<Coordinates>,
    pub require_click_modifier: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: None,
            mapbox_api_base: "api.mapbox.com".into(),
            mapbox_access_token: String::new(),
            geolocation_timeout: Duration::from_millis(5000),
            initial_position: None,
            require_click_modifier: false,
        }
    }
}

impl Config {
    /// Reads the process environment. `MAPBOX_ACCESS_TOKEN` is the only
    /// required variable.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| configuration_error("BIND_ADDR"))?,
            None => defaults.bind_addr,
        };

        let mapbox_access_token = lookup("MAPBOX_ACCESS_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| configuration_error("MAPBOX_ACCESS_TOKEN is not set"))?;

        let geolocation_timeout = match lookup("GEOLOCATION_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|_| configuration_error("GEOLOCATION_TIMEOUT_MS"))?,
            ),
            None => defaults.geolocation_timeout,
        };

        let initial_position = match lookup("INITIAL_POSITION") {
            Some(position) => Some(
                parse_position(&position)
                    .ok_or_else(|| configuration_error("INITIAL_POSITION"))?,
            ),
            None => None,
        };

        let require_click_modifier = match lookup("REQUIRE_CLICK_MODIFIER") {
            Some(flag) => flag
                .parse()
                .map_err(|_| configuration_error("REQUIRE_CLICK_MODIFIER"))?,
            None => defaults.require_click_modifier,
        };

        Ok(Self {
            bind_addr,
            database_url: lookup("DATABASE_URL"),
            mapbox_api_base: lookup("MAPBOX_API_BASE").unwrap_or(defaults.mapbox_api_base),
            mapbox_access_token,
            geolocation_timeout,
            initial_position,
            require_click_modifier,
        })
    }
}

/// Parses `"lng,lat"`.
fn parse_position(value: &str) -> Option<Coordinates> {
    let (lng, lat) = value.split_once(',')?;
    let coordinates = Coordinates::new(lng.trim().parse().ok()?, lat.trim().parse().ok()?);

    coordinates.is_valid().then_some(coordinates)
}
