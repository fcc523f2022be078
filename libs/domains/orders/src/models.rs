use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_LIMIT: u64 = 25;

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Just placed
    #[default]
    Created,
    /// Awaiting fulfilment
    Pending,
    /// Fulfilled
    Completed,
}

/// Order entity, stored in the `orders` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub buyer_email: String,
    /// Ids of the ordered products
    pub products: Vec<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// DTO for placing an order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    /// Caller-chosen identifier; generated when absent
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[validate(email(message = "buyerEmail must be a valid email address"))]
    pub buyer_email: String,
    #[validate(length(min = 1, message = "an order needs at least one product"))]
    pub products: Vec<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// Editable fields of an order; other keys, `_id` included, are ignored
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    #[validate(email(message = "buyerEmail must be a valid email address"))]
    pub buyer_email: Option<String>,
    #[validate(length(min = 1, message = "an order needs at least one product"))]
    pub products: Option<Vec<String>>,
    pub status: Option<OrderStatus>,
}

/// Query parameters for listing orders
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OrderFilter {
    /// Number of records to skip
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of records; 0 means no limit
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only orders containing this product id
    pub product_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Acknowledgment returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteOrderResponse {
    pub success: bool,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            product_id: None,
            status: None,
        }
    }
}

impl OrderFilter {
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        if let Some(ref product_id) = self.product_id {
            if !order.products.iter().any(|p| p == product_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        true
    }
}

impl Order {
    pub fn new(input: CreateOrder) -> Self {
        Self {
            id: input
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::now_v7().simple().to_string()),
            buyer_email: input.buyer_email,
            products: input.products,
            status: input.status,
        }
    }

    /// Copy every field present in `change` onto this order
    pub fn apply_update(&mut self, change: UpdateOrder) {
        if let Some(buyer_email) = change.buyer_email {
            self.buyer_email = buyer_email;
        }
        if let Some(products) = change.products {
            self.products = products;
        }
        if let Some(status) = change.status {
            self.status = status;
        }
    }
}

impl DeleteOrderResponse {
    pub fn deleted() -> Self {
        Self { success: true }
    }
}
