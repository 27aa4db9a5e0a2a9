//! Shared types for the storefront backend
//!
//! Common types used across crates: domain models, the unified error
//! system, response structures, and utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
