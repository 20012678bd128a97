use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::Location;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SignInParams {
    id: Option<Uuid>,
    email: Option<String>,
}

impl From<SignInParams> for User {
    fn from(params: SignInParams) -> Self {
        match params.id {
            Some(id) => User::new(id, params.email),
            None => User::local(),
        }
    }
}

pub async fn sign_in(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SignInParams>,
) -> Result<Json<Vec<Location>>, Error> {
    let locations = api.sign_in(params.into()).await?;

    Ok(locations.into())
}

pub async fn sign_out(Extension(api): Extension<DynAPI>) -> Result<StatusCode, Error> {
    api.sign_out().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn current(Extension(api): Extension<DynAPI>) -> Json<Option<User>> {
    api.current_user().await.into()
}
