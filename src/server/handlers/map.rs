use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::MapSnapshot;
use crate::entities::{Coordinates, Location, MapLayer, Theme};
use crate::error::Error;
use crate::map::ClickEvent;
use crate::panel::Panel;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ConfirmParams {
    name: String,
}

#[derive(Serialize, Deserialize)]
pub struct StyleParams {
    layer: Option<MapLayer>,
    theme: Option<Theme>,
}

#[derive(Serialize, Deserialize)]
pub struct PanelParams {
    panel: Panel,
}

pub async fn snapshot(Extension(api): Extension<DynAPI>) -> Json<MapSnapshot> {
    api.map_snapshot().await.into()
}

pub async fn initialize(Extension(api): Extension<DynAPI>) -> Result<Json<MapSnapshot>, Error> {
    let snapshot = api.initialize_map().await?;

    Ok(snapshot.into())
}

pub async fn click(
    Extension(api): Extension<DynAPI>,
    Json(event): Json<ClickEvent>,
) -> Json<Option<Coordinates>> {
    api.handle_click(event).await.into()
}

pub async fn confirm(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ConfirmParams>,
) -> Result<Json<Location>, Error> {
    let location = api.confirm_pending_location(params.name).await?;

    Ok(location.into())
}

pub async fn cancel(Extension(api): Extension<DynAPI>) -> Json<Option<Coordinates>> {
    api.cancel_pending_location().await.into()
}

pub async fn change_style(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<StyleParams>,
) -> Json<MapSnapshot> {
    api.change_style(params.layer, params.theme).await.into()
}

pub async fn style_loaded(Extension(api): Extension<DynAPI>) -> Json<MapSnapshot> {
    api.style_loaded().await.into()
}

pub async fn toggle_panel(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PanelParams>,
) -> Json<Panel> {
    api.toggle_panel(params.panel).await.into()
}

pub async fn dispose(Extension(api): Extension<DynAPI>) -> StatusCode {
    api.dispose_map().await;

    StatusCode::NO_CONTENT
}
