//! Error types for the authorization gate

use thiserror::Error;

/// Authorization gate errors
///
/// Only hard failures live here. "No policy at this key" and "header
/// absent" are normal branches of the cascade, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Request rejected before any lookup (e.g. empty path)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The policy store failed in a way other than "not found"
    #[error("policy store error: {0}")]
    Store(String),

    /// The decision engine could not evaluate a found policy
    #[error("evaluation of {query} failed: {message}")]
    Evaluation { query: String, message: String },
}

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
