//! Cart state manager.
//!
//! [`CartManager`] is the single source of truth for cart contents. It owns
//! an injected [`KeyValueStore`], keeps the current [`Cart`] in memory, and
//! writes the full cart back to the store after every mutation.
//!
//! Every mutation follows the same two steps: compute the next cart from the
//! current one, then persist it. The in-memory cart only advances once the
//! write has succeeded, so memory never runs ahead of storage.

use std::collections::BTreeSet;

use chrono::Weekday;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tiffin_core::storage::keys;
use tiffin_core::{
    Cart, CartItem, CartItemInput, CartLine, CartPhase, CartUpdate, CurrencyCode,
    DeliveryAddress, DeliverySlot, ItemId, KeyValueStore, LineChange, Price, VendorConflict,
    VendorId,
};
use tracing::{debug, info, instrument, warn};

use crate::config::StorefrontConfig;
use crate::error::{CartError, Result};

/// Result of [`CartManager::add_to_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The cart changed (or a zero delta hit an existing line).
    Applied(LineChange),
    /// The item belongs to another vendor; the cart was left as it was.
    Conflict(VendorConflict),
}

impl AddOutcome {
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// The conflict, if the add was refused.
    #[must_use]
    pub const fn conflict(&self) -> Option<&VendorConflict> {
        match self {
            Self::Conflict(conflict) => Some(conflict),
            Self::Applied(_) => None,
        }
    }
}

/// Derived totals for rendering a cart badge or footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: u64,
    pub subtotal: Price,
    pub vendor: Option<VendorId>,
}

/// Cart state manager over an injected key/value store.
#[derive(Debug)]
pub struct CartManager<S> {
    store: S,
    cart: Cart,
    currency: CurrencyCode,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Load the persisted cart, reporting totals in the default currency.
    ///
    /// Missing, unreadable, or invalid persisted state yields an empty cart.
    pub fn load(store: S) -> Self {
        Self::load_with_currency(store, CurrencyCode::default())
    }

    /// Load the persisted cart using settings from `config`.
    pub fn with_config(store: S, config: &StorefrontConfig) -> Self {
        Self::load_with_currency(store, config.currency)
    }

    /// Load the persisted cart, reporting totals in `currency`.
    #[instrument(skip(store))]
    pub fn load_with_currency(store: S, currency: CurrencyCode) -> Self {
        let cart = read_cart(&store);
        info!(
            lines = cart.len(),
            total_quantity = cart.total_quantity(),
            "Loaded cart"
        );
        Self {
            store,
            cart,
            currency,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn phase(&self) -> CartPhase {
        self.cart.phase()
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.cart.len(),
            total_quantity: self.cart.total_quantity(),
            subtotal: Price::new(self.cart.subtotal(), self.currency),
            vendor: self.cart.vendor().cloned(),
        }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Add `delta` units of `item` to the cart.
    ///
    /// A negative `delta` decrements, removing the line once it reaches zero.
    /// An item from a vendor other than the one the cart is bound to is
    /// refused with [`AddOutcome::Conflict`] and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted; the
    /// in-memory cart is left unchanged in that case.
    #[instrument(
        skip(self, item),
        fields(item_id = %item.item_id, vendor_id = %item.vendor_id)
    )]
    pub fn add_to_cart(&mut self, item: &CartItem, delta: i32) -> Result<AddOutcome> {
        match self.cart.with_item(item, delta) {
            Ok(update) => self.commit(update).map(AddOutcome::Applied),
            Err(conflict) => {
                info!(cart_vendor = %conflict.cart_vendor, "Vendor conflict, cart unchanged");
                Ok(AddOutcome::Conflict(conflict))
            }
        }
    }

    /// Validate a loosely-typed item and add it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] if the input fails validation, or a
    /// storage error if the cart cannot be persisted.
    pub fn add_input(&mut self, input: CartItemInput, delta: i32) -> Result<AddOutcome> {
        let item = CartItem::parse(input)?;
        self.add_to_cart(&item, delta)
    }

    /// Add one unit of `item`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    pub fn increment(&mut self, item: &CartItem) -> Result<AddOutcome> {
        self.add_to_cart(item, 1)
    }

    /// Remove one unit of an item already in the cart.
    ///
    /// Returns `None` without touching storage if the item is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self, item_id), fields(item_id = %item_id))]
    pub fn decrement(&mut self, item_id: &ItemId) -> Result<Option<LineChange>> {
        match self.cart.with_adjusted(item_id, -1) {
            Some(update) => self.commit(update).map(Some),
            None => {
                debug!("Item not in cart, nothing to decrement");
                Ok(None)
            }
        }
    }

    /// Empty the cart and start over with `item`.
    ///
    /// This is the "clear cart and add" answer to a [`VendorConflict`].
    ///
    /// # Errors
    ///
    /// Returns an error if clearing or persisting fails.
    #[instrument(
        skip(self, item),
        fields(item_id = %item.item_id, vendor_id = %item.vendor_id)
    )]
    pub fn replace_cart_with(&mut self, item: &CartItem, delta: i32) -> Result<LineChange> {
        self.clear_cart()?;
        self.commit(Cart::starting_with(item, delta))
    }

    /// Empty the cart and drop every cart-dependent selection.
    ///
    /// Calling this on an empty cart leaves the same empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if a key cannot be removed from the store.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.store.remove(keys::CART)?;
        let cleared = std::mem::take(&mut self.cart).len();

        for key in keys::CART_DEPENDENT {
            self.store.remove(key)?;
        }

        if cleared > 0 {
            info!(lines = cleared, "Cleared cart");
        } else {
            debug!("Cart already empty");
        }
        Ok(())
    }

    /// Clear the cart when the customer logs out.
    ///
    /// # Errors
    ///
    /// Returns an error if a key cannot be removed from the store.
    pub fn logout(&mut self) -> Result<()> {
        info!("Logging out, discarding cart");
        self.clear_cart()
    }

    /// Distinct category labels in the cart, read fresh from storage.
    #[must_use]
    pub fn cart_categories(&self) -> BTreeSet<String> {
        read_cart(&self.store).categories()
    }

    // =========================================================================
    // Delivery selections
    // =========================================================================

    /// Remember the delivery address for this order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if the cart has no lines, or a storage
    /// error if the selection cannot be written.
    pub fn select_address(&mut self, address: &DeliveryAddress) -> Result<()> {
        self.require_contents()?;
        self.write_json(keys::DELIVERY_ADDRESS, address)?;
        debug!(address_id = %address.id, "Selected delivery address");
        Ok(())
    }

    #[must_use]
    pub fn selected_address(&self) -> Option<DeliveryAddress> {
        read_json(&self.store, keys::DELIVERY_ADDRESS)
    }

    /// Remember which weekdays to deliver on. An empty list clears the choice.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if the cart has no lines, or a storage
    /// error if the selection cannot be written.
    pub fn select_days(&mut self, days: &[Weekday]) -> Result<()> {
        self.require_contents()?;
        let days = normalize_days(days.to_vec());
        if days.is_empty() {
            self.store.remove(keys::DELIVERY_DAYS)?;
        } else {
            self.write_json(keys::DELIVERY_DAYS, &days)?;
        }
        debug!(days = ?days, "Selected delivery days");
        Ok(())
    }

    /// Selected weekdays, Monday first, without duplicates.
    #[must_use]
    pub fn selected_days(&self) -> Vec<Weekday> {
        normalize_days(read_json(&self.store, keys::DELIVERY_DAYS).unwrap_or_default())
    }

    /// Remember a delivery slot, replacing any slot for the same category.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if the cart has no lines, or a storage
    /// error if the selection cannot be written.
    pub fn select_slot(&mut self, slot: DeliverySlot) -> Result<()> {
        self.require_contents()?;
        let mut slots = self.selected_slots();
        slots.retain(|existing| existing.category != slot.category);
        debug!(slot_id = %slot.id, category = %slot.category, "Selected delivery slot");
        slots.push(slot);
        slots.sort_by(|a, b| a.category.cmp(&b.category));
        self.write_json(keys::DELIVERY_SLOTS, &slots)
    }

    /// Every stored slot, one per category.
    #[must_use]
    pub fn selected_slots(&self) -> Vec<DeliverySlot> {
        read_json(&self.store, keys::DELIVERY_SLOTS).unwrap_or_default()
    }

    /// Stored slots whose category is present in the cart.
    #[must_use]
    pub fn relevant_slots(&self) -> Vec<DeliverySlot> {
        let categories = self.cart_categories();
        self.selected_slots()
            .into_iter()
            .filter(|slot| categories.contains(&slot.category))
            .collect()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persist `update.cart`, then make it current.
    fn commit(&mut self, update: CartUpdate) -> Result<LineChange> {
        self.write_json(keys::CART, &update.cart)?;
        self.cart = update.cart;

        if self.cart.is_empty() {
            for key in keys::CART_DEPENDENT {
                self.store.remove(key)?;
            }
        }

        debug!(
            change = ?update.change,
            total_quantity = self.cart.total_quantity(),
            "Cart updated"
        );
        Ok(update.change)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }

    fn require_contents(&self) -> Result<()> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(())
    }
}

/// Read the persisted cart, treating anything unusable as empty.
fn read_cart<S: KeyValueStore>(store: &S) -> Cart {
    let Some(lines) = read_json::<Vec<CartLine>, S>(store, keys::CART) else {
        return Cart::new();
    };
    Cart::from_lines(lines).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding persisted cart that breaks cart invariants");
        Cart::new()
    })
}

/// Read and decode a JSON value, logging and discarding anything unusable.
fn read_json<T: DeserializeOwned, S: KeyValueStore>(store: &S, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted state");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable persisted state");
            None
        }
    }
}

fn normalize_days(mut days: Vec<Weekday>) -> Vec<Weekday> {
    days.sort_by_key(Weekday::num_days_from_monday);
    days.dedup();
    days
}
