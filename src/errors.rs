//! Unified error type for the crate.
//!
//! Domain failures (validation, conflicts, insufficient stock, missing rows)
//! get their own variants so callers can match on them; everything coming out
//! of the persistence layer is wrapped as [`Error::Database`].

use thiserror::Error;

/// All errors surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (bad config file, missing setting).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Input failed validation before any mutation was attempted.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The operation would violate a uniqueness rule, e.g. a second pending
    /// order for the same table.
    #[error("Conflict: {message}")]
    Conflict {
        /// Which rule was violated
        message: String,
    },

    /// A referenced row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"product"` or `"purchase"`
        entity: &'static str,
        /// The identifier that failed to resolve
        id: String,
    },

    /// An order line asked for more units than the ledger has on hand.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Name of the product that is short
        product: String,
        /// Units the order line asked for
        requested: i32,
        /// Units currently on hand
        available: i32,
    },

    /// Underlying SeaORM / SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
