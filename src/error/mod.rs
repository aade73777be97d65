//! Error Handling Module
//!
//! This module provides the gateway error taxonomy:
//! - Core error types (`GatewayError`, `ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use siumai_media_gateway::error::{ErrorCategory, GatewayError};
//!
//! let error = GatewayError::invalid_choice("seconds", &["4", "8", "12"], 5);
//! assert_eq!(error.category(), ErrorCategory::Validation);
//! ```

mod conversions;
pub mod types;

pub use types::*;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GatewayError>;
