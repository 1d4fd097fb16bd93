//! Integration tests for the Tiffin cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tiffin-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Add, conflict, clear, and remove sequences
//! - `cart_persistence` - Reloading state from a file-backed store
//! - `checkout_flow` - Delivery selections and the checkout hand-off
