//! API routes module

pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Resource routes, merged at the root by `create_router`
pub async fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new()
        .nest("/products", products::router(state).await?)
        .nest("/orders", orders::router(state).await?))
}
