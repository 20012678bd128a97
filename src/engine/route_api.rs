use super::{AppState, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    entities::{Location, RouteOption, TravelMode},
    error::{not_found_error, Error},
    routing::RouteInfo,
};

fn resolve(state: &AppState, id: Option<Uuid>) -> Result<Option<Location>, Error> {
    id.map(|id| state.locations.find(id).cloned().ok_or_else(not_found_error))
        .transpose()
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn set_route(
        &self,
        start: Option<Uuid>,
        end: Option<Uuid>,
        mode: TravelMode,
    ) -> Result<Option<RouteInfo>, Error> {
        let request = {
            let mut state = self.state.lock().await;
            state.session.require_user()?;

            let start = resolve(&state, start)?;
            let end = resolve(&state, end)?;

            let AppState { routes, map, .. } = &mut *state;
            routes.set_endpoints(start, end, mode, map)
        };

        if let Some(request) = request {
            self.run_route_request(request).await;
        }

        Ok(self.state.lock().await.routes.info())
    }

    /// Always asks for fresh directions. Resolves to no routes when a newer
    /// request replaced this one.
    #[tracing::instrument(skip(self))]
    async fn compute_routes(
        &self,
        start: Uuid,
        end: Uuid,
        mode: TravelMode,
    ) -> Result<Vec<RouteOption>, Error> {
        let request = {
            let mut state = self.state.lock().await;
            state.session.require_user()?;

            let start = resolve(&state, Some(start))?.ok_or_else(not_found_error)?;
            let end = resolve(&state, Some(end))?.ok_or_else(not_found_error)?;

            let AppState { routes, map, .. } = &mut *state;
            routes.compute(start, end, mode, map)
        };

        Ok(self.run_route_request(request).await.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn select_route_index(&self, index: i64) -> Option<RouteInfo> {
        let mut state = self.state.lock().await;
        let AppState {
            routes, map, panel, ..
        } = &mut *state;

        routes.select_route_index(index, map, *panel)?;
        routes.info()
    }

    #[tracing::instrument(skip(self))]
    async fn next_route(&self) -> Option<RouteInfo> {
        let mut state = self.state.lock().await;
        let AppState {
            routes, map, panel, ..
        } = &mut *state;

        routes.next_route(map, *panel)?;
        routes.info()
    }

    #[tracing::instrument(skip(self))]
    async fn previous_route(&self) -> Option<RouteInfo> {
        let mut state = self.state.lock().await;
        let AppState {
            routes, map, panel, ..
        } = &mut *state;

        routes.previous_route(map, *panel)?;
        routes.info()
    }

    async fn current_route(&self) -> Option<RouteInfo> {
        self.state.lock().await.routes.info()
    }
}
