//! Products API routes

use axum::Router;
use domain_products::{
    InMemoryProductRepository, MongoProductRepository, ProductRepository, ProductService, handlers,
};
use std::path::Path;

use crate::seed;
use crate::state::{AppState, Storage};

/// Build the products router over the configured storage, creating indexes
/// and importing the seed file first.
pub async fn router(state: &AppState) -> eyre::Result<Router> {
    let seed_file = state.config.seed_file.as_deref();

    match &state.storage {
        Storage::Mongo { db, .. } => {
            let repository = MongoProductRepository::new(db);
            repository.init_indexes().await?;
            mount(repository, seed_file).await
        }
        Storage::InMemory => mount(InMemoryProductRepository::new(), seed_file).await,
    }
}

async fn mount<R: ProductRepository + 'static>(
    repository: R,
    seed_file: Option<&Path>,
) -> eyre::Result<Router> {
    let service = ProductService::new(repository);

    if let Some(path) = seed_file {
        seed::import_products(&service, path).await?;
    }

    Ok(handlers::router(service))
}
