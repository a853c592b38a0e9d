//! Error types for the r2skill domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all r2skill operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Persistence errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Routing / handler errors ---
    #[error("Skill error: {0}")]
    Skill(#[from] SkillError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Attribute store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored attributes are corrupted: {0}")]
    Corrupted(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Debug, Error)]
pub enum SkillError {
    /// No request handler accepted the request. Only reachable when the
    /// handler chain has been assembled without a catch-all.
    #[error("No handler can route {request_type} request (intent: {})", intent.as_deref().unwrap_or("none"))]
    UnroutableRequest {
        request_type: String,
        intent: Option<String>,
    },

    #[error("Request carries no user identifier")]
    MissingIdentifier,
}
