use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    auth::User,
    entities::{Location, UserPreferences},
    error::Error,
    store::Backend,
};

type Database = Postgres;

/// PostgreSQL backend storing entities as JSONB documents.
#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: Pool<Database>,
}

impl PgBackend {
    #[tracing::instrument(name = "PgBackend::connect", skip(db_uri))]
    pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Self::new(pool).await
    }

    #[tracing::instrument(name = "PgBackend::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // location service (KV store)
        pool.execute("CREATE TABLE IF NOT EXISTS locations (id UUID PRIMARY KEY, user_id UUID NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS locations_user_id ON locations (user_id, created_at)")
            .await?;

        // preference service (KV store)
        pool.execute("CREATE TABLE IF NOT EXISTS preferences (user_id UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for PgBackend {
    #[tracing::instrument(skip(self))]
    async fn list_locations(&self, user: &User) -> Result<Vec<Location>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(
            sqlx::query("SELECT data FROM locations WHERE user_id = $1 ORDER BY created_at ASC")
                .bind(&user.id),
        );

        let mut locations = vec![];

        while let Some(row) = rows.try_next().await? {
            let Json(location): Json<Location> = row.try_get("data")?;
            locations.push(location);
        }

        Ok(locations)
    }

    #[tracing::instrument(skip(self))]
    async fn add_location(&self, user: &User, location: &Location) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO locations (id, user_id, created_at, data) VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
            )
            .bind(&location.id)
            .bind(&user.id)
            .bind(&location.created_at)
            .bind(Json(location)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_location(&self, user: &User, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("DELETE FROM locations WHERE id = $1 AND user_id = $2")
                .bind(&id)
                .bind(&user.id),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_preferences(&self, user: &User) -> Result<Option<UserPreferences>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query("SELECT data FROM preferences WHERE user_id = $1").bind(&user.id),
            )
            .await?;

        match maybe_result {
            Some(result) => {
                let Json(preferences) = result.try_get("data")?;
                Ok(Some(preferences))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn save_preferences(
        &self,
        user: &User,
        preferences: &UserPreferences,
    ) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO preferences (user_id, data) VALUES ($1, $2) ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data",
            )
            .bind(&user.id)
            .bind(Json(preferences)),
        )
        .await?;

        Ok(())
    }
}
