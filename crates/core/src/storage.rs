//! Key/value storage seam for client-local persistence.
//!
//! The cart and its delivery selections are persisted as JSON strings under
//! the well-known [`keys`]. Implementations live in the storefront crate.

use std::io;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or removing a key failed at the I/O layer.
    #[error("storage I/O error for key `{key}`: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The key cannot be stored by this backend.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// Synchronous string key/value store.
///
/// Mirrors browser local storage: every call completes before returning,
/// and removing an absent key is not an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Succeeds if the key is already absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Storage keys for cart state.
pub mod keys {
    /// Key for the serialized array of cart lines.
    pub const CART: &str = "cart";

    /// Key for the selected delivery address.
    pub const DELIVERY_ADDRESS: &str = "selectedAddress";

    /// Key for the selected delivery weekdays.
    pub const DELIVERY_DAYS: &str = "selectedDays";

    /// Key for the selected delivery slots, one per category.
    pub const DELIVERY_SLOTS: &str = "selectedSlots";

    /// Keys whose values are only meaningful while the cart has contents.
    pub const CART_DEPENDENT: [&str; 3] = [DELIVERY_ADDRESS, DELIVERY_DAYS, DELIVERY_SLOTS];

    /// Every key cleared together with the cart.
    pub const ALL: [&str; 4] = [CART, DELIVERY_ADDRESS, DELIVERY_DAYS, DELIVERY_SLOTS];
}
