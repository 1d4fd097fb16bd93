//! Unified error handling for cart operations.
//!
//! A vendor conflict is deliberately absent here: it is a normal outcome of
//! adding to the cart and is reported through
//! [`AddOutcome`](crate::manager::AddOutcome).

use thiserror::Error;
use tiffin_core::{ItemError, StoreError};

/// Error type for [`CartManager`](crate::CartManager) operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The backing store could not be read or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Cart state could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The item descriptor failed validation.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemError),

    /// A delivery selection was made with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
