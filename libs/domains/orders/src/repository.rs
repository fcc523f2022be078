use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderFilter};

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: &str) -> OrderResult<Option<Order>>;

    /// Page through orders in ascending `_id` order
    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<Order>>;

    async fn update(&self, order: Order) -> OrderResult<Order>;

    /// Returns `false` when nothing matched `id`
    async fn delete(&self, id: &str) -> OrderResult<bool>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<BTreeMap<String, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.id) {
            return Err(OrderError::Duplicate(order.id));
        }
        orders.insert(order.id.clone(), order.clone());

        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let take = match filter.limit {
            0 => usize::MAX,
            limit => usize::try_from(limit).unwrap_or(usize::MAX),
        };
        let skip = usize::try_from(filter.offset).unwrap_or(usize::MAX);

        Ok(orders
            .values()
            .filter(|o| filter.matches(o))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;

        let Some(slot) = orders.get_mut(&order.id) else {
            return Err(OrderError::NotFound(order.id));
        };
        *slot = order.clone();

        tracing::info!(order_id = %order.id, "Updated order");
        Ok(order)
    }

    async fn delete(&self, id: &str) -> OrderResult<bool> {
        let removed = self.orders.write().await.remove(id).is_some();

        if removed {
            tracing::info!(order_id = %id, "Deleted order");
        }
        Ok(removed)
    }
}
