use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Implementations enforce the product schema on `create` and keep records
/// ordered by `_id` for `list`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Validate and persist a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Page through products in ascending `_id` order
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Replace a stored product with `product`
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Returns `false` when nothing matched `id`
    async fn delete(&self, id: &str) -> ProductResult<bool>;

    async fn exists(&self, id: &str) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::try_from(input)?;
        let mut products = self.products.write().await;

        if products.contains_key(&product.id) {
            return Err(ProductError::Duplicate(product.id));
        }

        products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let take = match filter.limit {
            0 => usize::MAX,
            limit => usize::try_from(limit).unwrap_or(usize::MAX),
        };
        let skip = usize::try_from(filter.offset).unwrap_or(usize::MAX);

        // BTreeMap iterates in ascending key order.
        let result = products
            .values()
            .filter(|p| filter.matches(p))
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok(result)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let Some(slot) = products.get_mut(&product.id) else {
            return Err(ProductError::NotFound(product.id));
        };
        *slot = product.clone();

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let removed = products.remove(id).is_some();

        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn exists(&self, id: &str) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.contains_key(id))
    }
}
