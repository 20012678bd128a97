use axum::extract::{Extension, Json};

use crate::entities::UserPreferences;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<UserPreferences>, Error> {
    let preferences = api.get_preferences().await?;

    Ok(preferences.into())
}

pub async fn save(
    Extension(api): Extension<DynAPI>,
    Json(preferences): Json<UserPreferences>,
) -> Result<Json<UserPreferences>, Error> {
    let preferences = api.save_preferences(preferences).await?;

    Ok(preferences.into())
}
