//! Startup import of the product seed file

use domain_products::{ProductRepository, ProductService, SeedReport};
use eyre::WrapErr;
use std::path::Path;
use tracing::info;

/// Load a JSON array of products from `path` and insert the records whose
/// `_id` is not stored yet.
pub async fn import_products<R: ProductRepository>(
    service: &ProductService<R>,
    path: &Path,
) -> eyre::Result<SeedReport> {
    info!(path = %path.display(), "Importing product seed file");

    let raw = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("failed to read seed file {}", path.display()))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("seed file {} is not a JSON array", path.display()))?;

    let report = service.seed_products(records).await?;
    Ok(report)
}
