//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use crate::error::{OrderError, OrderResult, is_duplicate_key};
use crate::models::{Order, OrderFilter};
use crate::repository::OrderRepository;

pub const COLLECTION: &str = "orders";

#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Order>(collection_name),
        }
    }

    /// Indexes backing the `productId` and `status` filters.
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "products": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_products".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "status": 1 })
                .options(IndexOptions::builder().name("idx_status".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    fn build_filter(filter: &OrderFilter) -> Document {
        let mut doc = doc! {};

        // Equality against an array field matches any element.
        if let Some(ref product_id) = filter.product_id {
            doc.insert("products", product_id.as_str());
        }
        if let Some(status) = filter.status {
            doc.insert("status", status.to_string());
        }

        doc
    }

    fn find_options(filter: &OrderFilter) -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(filter.offset)
            .limit(i64::try_from(filter.limit).unwrap_or(i64::MAX))
            .build()
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await.map_err(|e| {
            if is_duplicate_key(&e) {
                OrderError::Duplicate(order.id.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(order_id = %order.id, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .with_options(Self::find_options(&filter))
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn update(&self, order: Order) -> OrderResult<Order> {
        let result = self
            .collection
            .replace_one(doc! { "_id": order.id.as_str() }, &order)
            .await?;

        if result.matched_count == 0 {
            return Err(OrderError::NotFound(order.id));
        }

        tracing::info!(order_id = %order.id, "Order updated successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> OrderResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(order_id = %id, "Order deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    #[test]
    fn test_build_filter_empty() {
        assert!(MongoOrderRepository::build_filter(&OrderFilter::default()).is_empty());
    }

    #[test]
    fn test_build_filter_product_and_status() {
        let filter = OrderFilter::default()
            .with_product("p1")
            .with_status(OrderStatus::Pending);

        assert_eq!(
            MongoOrderRepository::build_filter(&filter),
            doc! { "products": "p1", "status": "PENDING" }
        );
    }

    #[test]
    fn test_find_options_zero_limit() {
        let options = MongoOrderRepository::find_options(&OrderFilter::default().page(3, 0));
        assert_eq!(options.sort, Some(doc! { "_id": 1 }));
        assert_eq!(options.skip, Some(3));
        assert_eq!(options.limit, Some(0));
    }
}
