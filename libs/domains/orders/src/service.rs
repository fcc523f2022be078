//! Order Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, DeleteOrderResponse, Order, OrderFilter, UpdateOrder};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> OrderResult<Option<Order>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<Order> {
        input.validate()?;
        self.repository.create(Order::new(input)).await
    }

    /// Existence first, then field rules, then the merge.
    #[instrument(skip(self, change))]
    pub async fn update_order(&self, id: &str, change: UpdateOrder) -> OrderResult<Order> {
        let mut order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        change.validate()?;
        order.apply_update(change);

        self.repository.update(order).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &str) -> OrderResult<DeleteOrderResponse> {
        if !self.repository.delete(id).await? {
            return Err(OrderError::NotFound(id.to_string()));
        }

        Ok(DeleteOrderResponse::deleted())
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
