//! Tiffin Storefront library.
//!
//! Customer-side cart state: the [`CartManager`] that owns the cart, the
//! stores it persists into, and the checkout hand-off to the backend.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tiffin_core::CartItem;
//! use tiffin_storefront::{AddOutcome, CartManager, MemoryStore};
//!
//! let mut manager = CartManager::load(MemoryStore::new());
//! let thali = CartItem::new("P1", "V1", Decimal::from(100)).unwrap();
//! manager.add_to_cart(&thali, 1).unwrap();
//!
//! let dosa = CartItem::new("P2", "V2", Decimal::from(50)).unwrap();
//! let outcome = manager.add_to_cart(&dosa, 1).unwrap();
//! assert!(matches!(outcome, AddOutcome::Conflict(_)));
//! assert_eq!(manager.cart().total_quantity(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod manager;
pub mod stores;

pub use checkout::{CheckoutError, CheckoutPayload};
pub use config::{ConfigError, StorefrontConfig};
pub use error::CartError;
pub use manager::{AddOutcome, CartManager, CartSummary};
pub use stores::{FileStore, MemoryStore};
