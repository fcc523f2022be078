//! Custom extractors for Axum handlers.
//!
//! Each one turns axum's rejection into an [`AppError`](crate::errors::AppError)
//! so every malformed request gets the same error body.

pub mod json_body;
pub mod query_params;
pub mod validated_json;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
