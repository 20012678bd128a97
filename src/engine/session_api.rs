use super::Engine;

use async_trait::async_trait;

use crate::{
    api::SessionAPI,
    auth::User,
    entities::{Location, UserPreferences},
    error::{invalid_state_error, unauthorized_error, Error},
};

#[async_trait]
impl SessionAPI for Engine {
    /// Signs `user` in and loads their locations and preferences. A failed
    /// load is logged and leaves the lists empty.
    #[tracing::instrument(skip(self), fields(user = %user.id))]
    async fn sign_in(&self, user: User) -> Result<Vec<Location>, Error> {
        {
            let mut state = self.state.lock().await;
            if state.session.sign_in(user.clone()) {
                state.forget_user_data();
            }
        }

        let loaded = match self.backend.list_locations(&user).await {
            Ok(locations) => locations,
            Err(err) => {
                tracing::error!("failed to load locations: {}", err);
                vec![]
            }
        };

        let preferences = match self.backend.get_preferences(&user).await {
            Ok(preferences) => preferences.unwrap_or_default(),
            Err(err) => {
                tracing::error!("failed to load preferences: {}", err);
                UserPreferences::default()
            }
        };

        let mut state = self.state.lock().await;

        // someone else signed in while we were loading
        if state.session.user() != Some(&user) {
            return Err(invalid_state_error());
        }

        let layer = preferences.default_map_layer;
        state.locations.load(loaded);
        state.preferences = preferences;

        let theme = state.map.theme();
        state.map.set_style(layer, theme);

        let locations = state.locations.list().to_vec();
        state.map.reconcile_markers(&locations);

        tracing::info!("loaded {} locations", locations.len());

        Ok(locations)
    }

    #[tracing::instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;

        let user = state.session.sign_out().ok_or_else(unauthorized_error)?;
        state.forget_user_data();

        tracing::info!("signed out {}", user.id);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn current_user(&self) -> Option<User> {
        self.state.lock().await.session.user().cloned()
    }
}
