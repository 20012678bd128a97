use std::sync::Arc;

use waymark::config::Config;
use waymark::engine::Engine;
use waymark::error::Error;
use waymark::external::mapbox::MapboxDirections;
use waymark::map::{DynGeolocator, FixedPosition, Unsupported};
use waymark::routing::RouteSummary;
use waymark::server::serve;
use waymark::store::{DynBackend, MemoryBackend, PgBackend};

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let backend: DynBackend = match &config.database_url {
        Some(url) => Arc::new(PgBackend::connect(url, 5).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, locations are kept in memory only");
            Arc::new(MemoryBackend::new())
        }
    };

    let geolocator: DynGeolocator = match config.initial_position {
        Some(position) => Arc::new(FixedPosition(position)),
        None => Arc::new(Unsupported),
    };

    let directions = Arc::new(MapboxDirections::from_config(&config));
    let engine = Engine::new(&config, directions, backend, geolocator);

    let mut route_updates = engine.route_updates();
    tokio::spawn(async move {
        while route_updates.changed().await.is_ok() {
            let info = route_updates.borrow().clone();
            match info {
                Some(info) => {
                    let summary = RouteSummary::from(&info);
                    tracing::info!(
                        "route {} to {}: {}, {} ({})",
                        info.start.name,
                        info.end.name,
                        summary.distance,
                        summary.duration,
                        summary.mode
                    );
                }
                None => tracing::info!("route cleared"),
            }
        }
    });

    serve(engine, config.bind_addr).await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
