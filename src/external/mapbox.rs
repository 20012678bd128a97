use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::{Coordinates, RouteOption, RouteStep, TravelMode},
    error::{invalid_input_error, upstream_error, Error},
    external::DirectionsProvider,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
    message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
    geometry: Geometry,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    coordinates: Vec<Coordinates>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Step {
    distance: f64,
    maneuver: Maneuver,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Maneuver {
    instruction: String,
}

#[derive(Clone, Debug)]
pub struct MapboxDirections {
    client: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl MapboxDirections {
    pub fn new(api_base: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            access_token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.mapbox_api_base.clone(),
            config.mapbox_access_token.clone(),
        )
    }

    fn url(&self, origin: Coordinates, destination: Coordinates, mode: TravelMode) -> String {
        let origin: String = origin.into();
        let destination: String = destination.into();

        format!(
            "https://{}/directions/v5/{}/{};{}",
            self.api_base,
            mode.profile(),
            origin,
            destination
        )
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirections {
    #[tracing::instrument(skip(self))]
    async fn fetch_routes(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<Vec<RouteOption>, Error> {
        let res = self
            .client
            .get(self.url(origin, destination, mode))
            .query(&[("access_token", self.access_token.as_str())])
            .query(&[("geometries", "geojson"), ("overview", "full")])
            .query(&[("steps", "true"), ("alternatives", "true")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        // Mapbox answers 422 for unroutable pairs, which is still "no route"
        if status_code == 422 {
            return Ok(vec![]);
        } else if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        route_options(data)
    }
}

fn route_options(data: Response) -> Result<Vec<RouteOption>, Error> {
    match data.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Ok(vec![]),
        _ => {
            tracing::warn!("directions api returned {}: {:?}", data.code, data.message);
            return Err(upstream_error());
        }
    }

    let options = data
        .routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| {
            // only two waypoints are ever sent, so every route has one leg
            let steps = route
                .legs
                .into_iter()
                .next()
                .map(|leg| leg.steps)
                .unwrap_or_default()
                .into_iter()
                .map(|step| RouteStep {
                    instruction: step.maneuver.instruction,
                    distance: step.distance,
                })
                .collect();

            RouteOption {
                index,
                distance: route.distance,
                duration: route.duration,
                steps,
                geometry: route.geometry.coordinates,
            }
        })
        .collect();

    Ok(options)
}
