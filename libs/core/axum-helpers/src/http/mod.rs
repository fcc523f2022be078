//! HTTP middleware: CORS, security headers, request logging and panic recovery.
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, request_logging, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(request_logging))
//!     .layer(axum::middleware::from_fn(security_headers));
//! ```

pub mod cors;
pub mod logging;
pub mod panic;
pub mod security;

pub use cors::{CORS_ALLOWED_ORIGIN, cors_layer_from_env, create_cors_layer};
pub use logging::request_logging;
pub use panic::panic_response;
pub use security::security_headers;
