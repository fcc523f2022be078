//! Shop API - products and orders over MongoDB

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::connect_from_config_with_retry;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod seed;
mod state;

use config::Config;
use state::{AppState, Storage};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let storage = match &config.mongodb {
        Some(mongo) => {
            info!("Connecting to MongoDB at {}", mongo.redacted_url());
            let client = connect_from_config_with_retry(mongo, None).await?;
            let db = client.database(mongo.database());
            info!("Successfully connected to MongoDB database: {}", mongo.database());
            Storage::Mongo { client, db }
        }
        None => {
            warn!("MONGODB_URL is not set; records are kept in memory and lost on restart");
            Storage::InMemory
        }
    };

    let state = AppState { config, storage };

    let api_routes = api::routes(&state).await?;
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(&state));

    info!(
        storage = state.storage.name(),
        "Starting Shop API on port {}", state.config.server.port
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Storage::Mongo { client, .. } = state.storage {
            info!("Shutting down: closing MongoDB connections");
            drop(client);
            info!("MongoDB connection closed");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
