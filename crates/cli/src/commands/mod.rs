//! Subcommand implementations.

pub mod cart;
pub mod checkout;
pub mod delivery;

use thiserror::Error;
use tiffin_core::{ItemError, SlotError};
use tiffin_storefront::{CartError, CheckoutError};

/// Errors that can occur while running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// JSON input or output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item arguments failed validation.
    #[error("Invalid item: {0}")]
    Item(#[from] ItemError),

    /// Slot arguments failed validation.
    #[error("Invalid slot: {0}")]
    Slot(#[from] SlotError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Cart is not ready to check out.
    #[error("Checkout not ready: {0}")]
    Checkout(#[from] CheckoutError),
}
