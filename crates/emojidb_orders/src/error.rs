//! Error types for the order book.

use emojidb_core::CoreError;
use thiserror::Error;

/// Result type for order book operations.
pub type OrderResult<T> = Result<T, OrderError>;

/// Errors that can occur while taking or serving orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The book already holds the maximum number of open orders.
    #[error("maximum number of orders exceeded (max. {max} orders)")]
    TooManyOrders {
        /// Configured limit.
        max: usize,
    },

    /// No order has the requested id.
    #[error("order {id} not found")]
    OrderNotFound {
        /// The requested order id.
        id: u64,
    },

    /// A stored record holds the wrong kind of value.
    #[error("record in entity {entity} has an invalid value in field {field}")]
    InvalidRecord {
        /// Name of the entity.
        entity: String,
        /// The offending field.
        field: String,
    },

    /// Error from the underlying store.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl OrderError {
    /// True if the request referred to something that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::OrderNotFound { .. } => true,
            Self::Core(err) => err.is_not_found(),
            _ => false,
        }
    }
}
