//! Core types for Tiffin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod delivery;
pub mod id;
pub mod price;
pub mod quantity;

pub use delivery::{DeliveryAddress, DeliverySlot, SlotError};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use quantity::{Quantity, QuantityError};
