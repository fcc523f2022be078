//! Orders Domain
//!
//! Orders placed against the product catalog, stored in the `orders`
//! collection. An order references products by id only.
//!
//! ```text
//! Handlers → Service → Repository (MongoDB | in-memory) → Models
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CreateOrder, DeleteOrderResponse, Order, OrderFilter, OrderStatus, UpdateOrder};
pub use self::mongodb::MongoOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
