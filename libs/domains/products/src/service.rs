//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, DeleteProductResponse, Product, ProductFilter, SeedReport, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Product service: list/get/create/edit/destroy over a [`ProductRepository`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// `None` when no product has this id; absence is not an error here.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Option<Product>> {
        self.repository.get_by_id(id).await
    }

    /// Required fields are enforced by the repository when it persists.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Existence first, then field rules, then the whitelisted merge.
    #[instrument(skip(self, change))]
    pub async fn update_product(&self, id: &str, change: UpdateProduct) -> ProductResult<Product> {
        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.apply_update(change)?;

        self.repository.update(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<DeleteProductResponse> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(DeleteProductResponse::deleted())
    }

    /// Import seed records, skipping ids already stored and records that fail
    /// the product schema.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn seed_products(&self, records: Vec<serde_json::Value>) -> ProductResult<SeedReport> {
        let mut report = SeedReport::default();

        for (index, record) in records.into_iter().enumerate() {
            let input: CreateProduct = match serde_json::from_value(record) {
                Ok(input) => input,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed seed record");
                    report.invalid += 1;
                    continue;
                }
            };

            if let Some(ref id) = input.id {
                if self.repository.exists(id).await? {
                    report.existing += 1;
                    continue;
                }
            }

            match self.repository.create(input).await {
                Ok(_) => report.inserted += 1,
                Err(ProductError::Validation(reason)) => {
                    tracing::warn!(index, %reason, "Skipping invalid seed record");
                    report.invalid += 1;
                }
                Err(ProductError::Duplicate(_)) => report.existing += 1,
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            inserted = report.inserted,
            existing = report.existing,
            invalid = report.invalid,
            "Product seed import finished"
        );
        Ok(report)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_get_product_absent_is_none() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id()
            .with(eq("missing"))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock);
        assert!(service.get_product("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found_before_validation() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id().times(1).returning(|_| Ok(None));
        mock.expect_update().never();

        let service = ProductService::new(mock);
        let change = UpdateProduct {
            likes: Some(-1),
            ..Default::default()
        };

        let result = service.update_product("ghost", change).await;
        assert!(matches!(result, Err(ProductError::NotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_update_negative_likes_rejected() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, 3, &[]))));
        mock.expect_update().never();

        let service = ProductService::new(mock);
        let change = UpdateProduct {
            likes: Some(-1),
            ..Default::default()
        };

        let err = service.update_product("p1", change).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
        assert_eq!(err.to_string(), "Likes cannot be negative");
    }

    #[tokio::test]
    async fn test_update_zero_likes_persists_merge() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, 3, &["old"]))));
        mock.expect_update()
            .withf(|p| p.likes == 0 && p.has_tag("old"))
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock);
        let change = UpdateProduct {
            likes: Some(0),
            ..Default::default()
        };

        let updated = service.update_product("p1", change).await.unwrap();
        assert_eq!(updated.likes, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock);
        let result = service.delete_product("ghost").await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_acknowledges() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete().with(eq("p1")).returning(|_| Ok(true));

        let service = ProductService::new(mock);
        let response = service.delete_product("p1").await.unwrap();
        assert_eq!(response.message, "Product deleted successfully");
    }

    #[tokio::test]
    async fn test_seed_skips_existing_and_invalid() {
        let mut mock = MockProductRepository::new();
        mock.expect_exists()
            .returning(|id| Ok(id == "known"));
        mock.expect_create()
            .times(2)
            .returning(|input| Product::try_from(input));

        let service = ProductService::new(mock);

        let records = vec![
            to_json(&product("known", 1, &[])),
            to_json(&product("fresh", 2, &[])),
            serde_json::json!({ "_id": "no-likes", "urls": null }),
            serde_json::json!("not an object"),
        ];

        let report = service.seed_products(records).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                inserted: 1,
                existing: 1,
                invalid: 2,
            }
        );
    }

    fn to_json(product: &Product) -> serde_json::Value {
        serde_json::to_value(product).unwrap()
    }
}
