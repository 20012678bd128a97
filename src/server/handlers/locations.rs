use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, Location};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    name: String,
    coordinates: Coordinates,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Location>>, Error> {
    let locations = api.list_locations().await?;

    Ok(locations.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Location>, Error> {
    let location = api.add_location(params.name, params.coordinates).await?;

    Ok(location.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, Error> {
    let location = api.delete_location(id).await?;

    Ok(location.into())
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, Error> {
    let location = api.select_location(id).await?;

    Ok(location.into())
}

pub async fn fit(Extension(api): Extension<DynAPI>) -> Result<StatusCode, Error> {
    api.fit_to_all_locations().await?;

    Ok(StatusCode::NO_CONTENT)
}
