//! Error codes shared by all API error bodies.
//!
//! Each code carries a string identifier for clients, an integer for logs and
//! metrics, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error codes carried by every [`ErrorResponse`](super::ErrorResponse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Generic malformed request
    BadRequest,
    /// Request validation failed
    ValidationError,
    /// Query string could not be parsed into the expected parameters
    InvalidQuery,
    /// JSON extraction from request body failed
    JsonExtraction,
    /// Requested resource was not found
    NotFound,
    /// Request conflicts with current resource state
    Conflict,
    /// An unexpected internal server error occurred
    InternalError,
    /// Document store operation failed
    DatabaseError,
}

impl ErrorCode {
    /// `(identifier, integer code, default message)` for every code.
    ///
    /// Integer ranges: 1000-1999 request and server, 2000-2999 database.
    const fn entry(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::BadRequest => ("BAD_REQUEST", 1000, "Malformed request"),
            Self::ValidationError => ("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::InvalidQuery => ("INVALID_QUERY", 1002, "Invalid query parameters"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::Conflict => ("CONFLICT", 1008, "Resource already exists"),
            Self::DatabaseError => ("DATABASE_ERROR", 2003, "Database error occurred"),
        }
    }

    /// Identifier sent to clients in the `error` field; matches the serde form.
    pub fn as_str(&self) -> &'static str {
        self.entry().0
    }

    /// Integer code used in structured logs and the `code` field.
    pub fn code(&self) -> i32 {
        self.entry().1
    }

    pub fn default_message(&self) -> &'static str {
        self.entry().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_and_integer() {
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    }

    #[test]
    fn test_error_code_display_matches_serde() {
        let code = ErrorCode::InvalidQuery;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, format!("\"{}\"", code));
    }
}
