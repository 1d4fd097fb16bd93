//! Tiffin Core - Shared types library.
//!
//! This crate provides the types used across all Tiffin components:
//! - `storefront` - Customer-side cart state manager and stores
//! - `cli` - Command-line client for driving a cart from the terminal
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no file access,
//! no HTTP clients. Cart updates are pure: every mutation returns a new
//! [`Cart`] value and leaves the original untouched. Persistence lives behind
//! the [`KeyValueStore`] trait and is implemented elsewhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, quantities, and delivery selections
//! - [`cart`] - Cart lines, item validation, and the single-vendor cart value
//! - [`storage`] - Key/value store seam and well-known storage keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;

pub use cart::*;
pub use storage::{KeyValueStore, StoreError};
pub use types::*;
