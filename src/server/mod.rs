mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{locations, map, preferences, routes, session};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route(
            "/session",
            get(session::current).post(session::sign_in).delete(session::sign_out),
        )
        .route("/locations", get(locations::list).post(locations::create))
        .route("/locations/fit", post(locations::fit))
        .route("/locations/:id", delete(locations::remove))
        .route("/locations/:id/select", post(locations::select))
        .route("/map", get(map::snapshot).delete(map::dispose))
        .route("/map/initialize", post(map::initialize))
        .route("/map/clicks", post(map::click))
        .route("/map/pending", post(map::confirm).delete(map::cancel))
        .route("/map/style", patch(map::change_style))
        .route("/map/style/loaded", post(map::style_loaded))
        .route("/panel", patch(map::toggle_panel))
        .route("/routes", post(routes::compute))
        .route("/routes/endpoints", put(routes::set_endpoints))
        .route("/routes/current", get(routes::current))
        .route("/routes/current/index", put(routes::select))
        .route("/routes/current/next", patch(routes::next))
        .route("/routes/current/previous", patch(routes::previous))
        .route("/preferences", get(preferences::find).put(preferences::save))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(unexpected_error)
}
