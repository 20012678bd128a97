use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PreferencesAPI,
    entities::UserPreferences,
    error::{invalid_input_error, Error},
};

const MAX_ZOOM: f64 = 22.0;

#[async_trait]
impl PreferencesAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn get_preferences(&self) -> Result<UserPreferences, Error> {
        let state = self.state.lock().await;
        state.session.require_user()?;

        Ok(state.preferences.clone())
    }

    /// Takes effect for this session immediately; a failed write is logged.
    #[tracing::instrument(skip(self))]
    async fn save_preferences(
        &self,
        preferences: UserPreferences,
    ) -> Result<UserPreferences, Error> {
        if !preferences.default_center.is_valid()
            || !(0.0..=MAX_ZOOM).contains(&preferences.default_zoom)
        {
            return Err(invalid_input_error());
        }

        let user = {
            let mut state = self.state.lock().await;
            let user = state.session.require_user()?.clone();
            state.preferences = preferences.clone();
            user
        };

        if let Err(err) = self.backend.save_preferences(&user, &preferences).await {
            tracing::error!("failed to persist preferences: {}", err);
        }

        Ok(preferences)
    }
}
