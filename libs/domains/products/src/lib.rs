//! Products Domain
//!
//! Photo products stored in the `products` collection: listing by tag with
//! offset pagination, lookup by `_id`, creation with required-field checks,
//! whitelisted edits, deletion and a bulk seed import.
//!
//! Layers, outermost first: `handlers` (axum routes) call `service`
//! ([`ProductService`]), which talks to a [`ProductRepository`] backed by
//! MongoDB ([`MongoProductRepository`]) or memory ([`InMemoryProductRepository`]).
//!
//! ```rust,no_run
//! use domain_products::{InMemoryProductRepository, ProductService, handlers};
//!
//! let router = handlers::router(ProductService::new(InMemoryProductRepository::new()));
//! # let _: axum::Router = router;
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, DeleteProductResponse, Product, ProductFilter, ProductLinks, ProductLinksInput,
    ProductTag, ProductTagInput, ProductUrls, ProductUrlsInput, ProductUser, ProductUserInput,
    SeedReport, UpdateProduct,
};
pub use self::mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
