use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod forecast;
mod routes;
mod utils;

use config::Config;
use forecast::{provinces::province_codes, AreaIndex, BmkgClient, ForecastService, ForecastStore};
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bmkg_forecast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        expiration_minutes = config.default_expiration_minutes,
        purge_minutes = config.purge_interval_minutes,
        "Service configuration initialized"
    );

    let store = ForecastStore::from_config(&config);
    if let Some(every) = config.purge_interval() {
        store.spawn_purge_task(every);
    }

    let client = Arc::new(BmkgClient::new(&config)?);

    // A province that cannot be indexed is fatal
    let area_index = if config.warm_area_index {
        AreaIndex::build(client.clone(), province_codes()).await?
    } else {
        tracing::warn!("Skipping area index build, area listings will be empty");
        AreaIndex::default()
    };

    let state = AppState {
        forecast_service: Arc::new(ForecastService::new(client, store, area_index)),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
