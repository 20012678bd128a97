use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{RouteOption, TravelMode};
use crate::error::Error;
use crate::routing::{RouteInfo, RouteSummary};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct EndpointParams {
    start: Option<Uuid>,
    end: Option<Uuid>,
    #[serde(default)]
    mode: TravelMode,
}

#[derive(Serialize, Deserialize)]
pub struct ComputeParams {
    start: Uuid,
    end: Uuid,
    #[serde(default)]
    mode: TravelMode,
}

#[derive(Serialize, Deserialize)]
pub struct SelectParams {
    index: i64,
}

/// The route info along with how the directions panel renders it.
#[derive(Serialize)]
pub struct CurrentRoute {
    info: RouteInfo,
    summary: RouteSummary,
}

impl From<RouteInfo> for CurrentRoute {
    fn from(info: RouteInfo) -> Self {
        let summary = RouteSummary::from(&info);
        Self { info, summary }
    }
}

pub async fn set_endpoints(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EndpointParams>,
) -> Result<Json<Option<CurrentRoute>>, Error> {
    let info = api.set_route(params.start, params.end, params.mode).await?;

    Ok(Json(info.map(CurrentRoute::from)))
}

pub async fn compute(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ComputeParams>,
) -> Result<Json<Vec<RouteOption>>, Error> {
    let routes = api
        .compute_routes(params.start, params.end, params.mode)
        .await?;

    Ok(routes.into())
}

pub async fn current(Extension(api): Extension<DynAPI>) -> Json<Option<CurrentRoute>> {
    Json(api.current_route().await.map(CurrentRoute::from))
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SelectParams>,
) -> Json<Option<CurrentRoute>> {
    Json(api.select_route_index(params.index).await.map(CurrentRoute::from))
}

pub async fn next(Extension(api): Extension<DynAPI>) -> Json<Option<CurrentRoute>> {
    Json(api.next_route().await.map(CurrentRoute::from))
}

pub async fn previous(Extension(api): Extension<DynAPI>) -> Json<Option<CurrentRoute>> {
    Json(api.previous_route().await.map(CurrentRoute::from))
}
