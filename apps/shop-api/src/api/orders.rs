//! Orders API routes

use axum::Router;
use domain_orders::{InMemoryOrderRepository, MongoOrderRepository, OrderService, handlers};

use crate::state::{AppState, Storage};

pub async fn router(state: &AppState) -> eyre::Result<Router> {
    let router = match &state.storage {
        Storage::Mongo { db, .. } => {
            let repository = MongoOrderRepository::new(db);
            repository.init_indexes().await?;
            handlers::router(OrderService::new(repository))
        }
        Storage::InMemory => handlers::router(OrderService::new(InMemoryOrderRepository::new())),
    };

    Ok(router)
}
