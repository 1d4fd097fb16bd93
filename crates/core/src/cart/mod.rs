//! The single-vendor shopping cart.
//!
//! [`Cart`] is an immutable value. Every update returns a [`CartUpdate`]
//! holding the next cart and a description of what changed; the caller
//! decides when to commit it. A cart is either empty or bound to exactly one
//! vendor, and no update can produce a cart that breaks that rule.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tiffin_core::{Cart, CartItem};
//!
//! let thali = CartItem::new("P1", "V1", Decimal::from(100)).unwrap();
//! let cart = Cart::new().with_item(&thali, 1).unwrap().cart;
//! let cart = cart.with_item(&thali, 1).unwrap().cart;
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.subtotal(), Decimal::from(200));
//!
//! let dosa = CartItem::new("P2", "V2", Decimal::from(50)).unwrap();
//! assert!(cart.with_item(&dosa, 1).is_err());
//! ```

pub mod item;
pub mod line;

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

pub use item::{CartItem, CartItemInput, ItemDisplay, ItemError};
pub use line::CartLine;

use crate::types::{ItemId, Quantity, VendorId};

/// Adding an item from a different vendor than the one the cart is bound to.
///
/// This is an expected outcome, not a failure: the UI asks the customer
/// whether to clear the cart and start over with the new vendor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "cart holds items from vendor {cart_vendor}; item {item_id} is sold by vendor {requested_vendor}"
)]
pub struct VendorConflict {
    /// Vendor the cart is currently bound to.
    pub cart_vendor: VendorId,
    /// Vendor of the rejected item.
    pub requested_vendor: VendorId,
    /// The rejected item.
    pub item_id: ItemId,
}

/// Persisted lines that cannot form a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartInvariantError {
    /// Two lines share an item ID.
    #[error("item {0} appears on more than one line")]
    DuplicateItem(ItemId),
    /// Lines from more than one vendor.
    #[error("cart mixes vendors {expected} and {found}")]
    MixedVendors {
        /// Vendor of the first line.
        expected: VendorId,
        /// First vendor that differs from it.
        found: VendorId,
    },
    /// A line that would not pass item validation.
    #[error("line {item_id} is invalid: {source}")]
    InvalidLine {
        /// Item ID as stored.
        item_id: ItemId,
        #[source]
        source: ItemError,
    },
}

/// Macro-state of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPhase {
    /// No lines; any vendor may be added.
    Empty,
    /// All lines belong to this vendor.
    Bound(VendorId),
}

/// What a single update did to the cart's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended.
    Added { item_id: ItemId, quantity: Quantity },
    /// An existing line's quantity moved.
    Updated {
        item_id: ItemId,
        previous: Quantity,
        current: Quantity,
    },
    /// A line dropped to zero and was removed.
    Removed { item_id: ItemId, previous: Quantity },
    /// A zero delta hit an existing line.
    Unchanged { item_id: ItemId },
}

impl LineChange {
    /// The item the change applies to.
    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        match self {
            Self::Added { item_id, .. }
            | Self::Updated { item_id, .. }
            | Self::Removed { item_id, .. }
            | Self::Unchanged { item_id } => item_id,
        }
    }
}

/// The next cart, plus what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CartUpdate {
    pub cart: Cart,
    pub change: LineChange,
}

/// Ordered cart lines, unique by item ID, all from one vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from stored lines, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if a line has a blank ID or negative price, an item ID
    /// repeats, or the lines span vendors.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartInvariantError> {
        let mut seen = HashSet::with_capacity(lines.len());
        let vendor = lines.first().map(|line| &line.vendor_id);

        for line in &lines {
            item::check_fields(&line.item_id, &line.vendor_id, line.unit_price).map_err(
                |source| CartInvariantError::InvalidLine {
                    item_id: line.item_id.clone(),
                    source,
                },
            )?;
            if !seen.insert(&line.item_id) {
                return Err(CartInvariantError::DuplicateItem(line.item_id.clone()));
            }
            if let Some(expected) = vendor
                && *expected != line.vendor_id
            {
                return Err(CartInvariantError::MixedVendors {
                    expected: expected.clone(),
                    found: line.vendor_id.clone(),
                });
            }
        }

        Ok(Self { lines })
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Look up the line for an item.
    #[must_use]
    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.item_id == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The vendor every line belongs to, or `None` when empty.
    #[must_use]
    pub fn vendor(&self) -> Option<&VendorId> {
        self.lines.first().map(|line| &line.vendor_id)
    }

    #[must_use]
    pub fn phase(&self) -> CartPhase {
        self.vendor()
            .map_or(CartPhase::Empty, |vendor| CartPhase::Bound(vendor.clone()))
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of `quantity × unit_price` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Distinct category labels across the lines.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<String> {
        self.lines
            .iter()
            .filter_map(|line| line.category().map(str::to_owned))
            .collect()
    }

    /// Add `delta` units of an item.
    ///
    /// - An existing line moves by `delta` and is removed if it reaches zero.
    /// - A new line gets `max(delta, 1)` units, provided the item's vendor
    ///   matches the cart's (or the cart is empty).
    ///
    /// # Errors
    ///
    /// Returns [`VendorConflict`] if the item would be a new line from a
    /// different vendor. `self` is untouched either way.
    pub fn with_item(&self, item: &CartItem, delta: i32) -> Result<CartUpdate, VendorConflict> {
        if let Some(update) = self.with_adjusted(&item.item_id, delta) {
            return Ok(update);
        }

        if let Some(cart_vendor) = self.vendor()
            && *cart_vendor != item.vendor_id
        {
            return Err(VendorConflict {
                cart_vendor: cart_vendor.clone(),
                requested_vendor: item.vendor_id.clone(),
                item_id: item.item_id.clone(),
            });
        }

        let quantity = Quantity::from_delta(delta);
        let mut lines = self.lines.clone();
        lines.push(CartLine::from_item(item, quantity));

        Ok(CartUpdate {
            cart: Self { lines },
            change: LineChange::Added {
                item_id: item.item_id.clone(),
                quantity,
            },
        })
    }

    /// A cart holding only `item`, with `max(delta, 1)` units.
    ///
    /// Used after a confirmed vendor switch, where there is nothing left to
    /// conflict with.
    pub fn starting_with(item: &CartItem, delta: i32) -> CartUpdate {
        let quantity = Quantity::from_delta(delta);
        CartUpdate {
            cart: Self {
                lines: vec![CartLine::from_item(item, quantity)],
            },
            change: LineChange::Added {
                item_id: item.item_id.clone(),
                quantity,
            },
        }
    }

    /// Move an existing line by `delta`, removing it at zero or below.
    ///
    /// Returns `None` if there is no line for `item_id`.
    #[must_use]
    pub fn with_adjusted(&self, item_id: &ItemId, delta: i32) -> Option<CartUpdate> {
        let mut lines = self.lines.clone();
        let line = lines.iter_mut().find(|line| &line.item_id == item_id)?;
        let previous = line.quantity;

        let change = match previous.apply_delta(delta) {
            Some(current) if current == previous => LineChange::Unchanged {
                item_id: item_id.clone(),
            },
            Some(current) => {
                line.quantity = current;
                LineChange::Updated {
                    item_id: item_id.clone(),
                    previous,
                    current,
                }
            }
            None => {
                lines.retain(|line| &line.item_id != item_id);
                LineChange::Removed {
                    item_id: item_id.clone(),
                    previous,
                }
            }
        };

        Some(CartUpdate {
            cart: Self { lines },
            change,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, vendor: &str, price: i64) -> CartItem {
        CartItem::new(id, vendor, Decimal::from(price)).unwrap()
    }

    fn assert_single_vendor(cart: &Cart) {
        if let Some(vendor) = cart.vendor() {
            assert!(cart.lines().iter().all(|line| &line.vendor_id == vendor));
        }
    }

    #[test]
    fn test_first_add_binds_vendor() {
        let update = Cart::new().with_item(&item("P1", "V1", 100), 1).unwrap();
        assert_eq!(update.cart.phase(), CartPhase::Bound(VendorId::new("V1")));
        assert_eq!(update.cart.subtotal(), Decimal::from(100));
        assert!(matches!(update.change, LineChange::Added { .. }));
    }

    #[test]
    fn test_same_item_merges() {
        let p1 = item("P1", "V1", 100);
        let cart = Cart::new().with_item(&p1, 1).unwrap().cart;
        let update = cart.with_item(&p1, 1).unwrap();

        assert_eq!(update.cart.len(), 1);
        assert_eq!(update.cart.total_quantity(), 2);
        assert_eq!(update.cart.subtotal(), Decimal::from(200));
        assert_eq!(
            update.change,
            LineChange::Updated {
                item_id: ItemId::new("P1"),
                previous: Quantity::ONE,
                current: Quantity::new(2).unwrap(),
            }
        );
    }

    #[test]
    fn test_conflict_leaves_cart_untouched() {
        let cart = Cart::new().with_item(&item("P1", "V1", 100), 2).unwrap().cart;
        let before = cart.clone();

        let conflict = cart.with_item(&item("P2", "V2", 50), 1).unwrap_err();
        assert_eq!(conflict.cart_vendor, VendorId::new("V1"));
        assert_eq!(conflict.requested_vendor, VendorId::new("V2"));
        assert_eq!(conflict.item_id, ItemId::new("P2"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let p1 = item("P1", "V1", 100);
        let cart = Cart::new().with_item(&p1, 1).unwrap().cart;
        let update = cart.with_item(&p1, -1).unwrap();

        assert!(update.cart.is_empty());
        assert_eq!(update.cart.total_quantity(), 0);
        assert_eq!(update.cart.phase(), CartPhase::Empty);
        assert!(matches!(update.change, LineChange::Removed { .. }));
    }

    #[test]
    fn test_over_decrement_clamps_to_removal() {
        let p1 = item("P1", "V1", 100);
        let cart = Cart::new().with_item(&p1, 3).unwrap().cart;
        let update = cart.with_item(&p1, -10).unwrap();
        assert!(update.cart.is_empty());
    }

    #[test]
    fn test_new_line_quantity_floors_at_one() {
        let update = Cart::new().with_item(&item("P1", "V1", 10), -4).unwrap();
        assert_eq!(update.cart.total_quantity(), 1);
    }

    #[test]
    fn test_zero_delta_on_existing_line() {
        let p1 = item("P1", "V1", 10);
        let cart = Cart::new().with_item(&p1, 2).unwrap().cart;
        let update = cart.with_item(&p1, 0).unwrap();
        assert_eq!(update.cart, cart);
        assert!(matches!(update.change, LineChange::Unchanged { .. }));
    }

    #[test]
    fn test_existing_line_merges_even_if_vendor_field_differs() {
        let cart = Cart::new().with_item(&item("P1", "V1", 10), 1).unwrap().cart;
        let update = cart.with_item(&item("P1", "V9", 10), 1).unwrap();
        assert_eq!(update.cart.total_quantity(), 2);
        assert_eq!(update.cart.vendor(), Some(&VendorId::new("V1")));
    }

    #[test]
    fn test_with_adjusted_missing_line() {
        assert!(Cart::new().with_adjusted(&ItemId::new("P1"), -1).is_none());
    }

    #[test]
    fn test_line_order_is_insertion_order() {
        let cart = Cart::new().with_item(&item("P2", "V1", 1), 1).unwrap().cart;
        let cart = cart.with_item(&item("P1", "V1", 1), 1).unwrap().cart;
        let cart = cart.with_item(&item("P2", "V1", 1), 1).unwrap().cart;
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, ["P2", "P1"]);
    }

    #[test]
    fn test_single_vendor_holds_across_sequence() {
        let ops = [
            (item("P1", "V1", 10), 1),
            (item("P2", "V2", 10), 1),
            (item("P3", "V1", 10), 2),
            (item("P1", "V1", 10), -1),
            (item("P3", "V1", 10), -2),
            (item("P2", "V2", 10), 1),
            (item("P4", "V1", 10), 1),
        ];

        let mut cart = Cart::new();
        for (it, delta) in &ops {
            if let Ok(update) = cart.with_item(it, *delta) {
                cart = update.cart;
            }
            assert_single_vendor(&cart);
        }
        assert_eq!(cart.vendor(), Some(&VendorId::new("V2")));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_categories_distinct() {
        let a = item("P1", "V1", 10).with_category("Lunch");
        let b = item("P2", "V1", 10).with_category("Dinner");
        let c = item("P3", "V1", 10).with_category("Lunch");
        let d = item("P4", "V1", 10);

        let mut cart = Cart::new();
        for it in [&a, &b, &c, &d] {
            cart = cart.with_item(it, 1).unwrap().cart;
        }
        let categories: Vec<String> = cart.categories().into_iter().collect();
        assert_eq!(categories, ["Dinner", "Lunch"]);
    }

    #[test]
    fn test_from_lines_rejects_duplicates() {
        let line = CartLine::from_item(&item("P1", "V1", 10), Quantity::ONE);
        let result = Cart::from_lines(vec![line.clone(), line]);
        assert!(matches!(result, Err(CartInvariantError::DuplicateItem(_))));
    }

    #[test]
    fn test_from_lines_rejects_mixed_vendors() {
        let a = CartLine::from_item(&item("P1", "V1", 10), Quantity::ONE);
        let b = CartLine::from_item(&item("P2", "V2", 10), Quantity::ONE);
        let result = Cart::from_lines(vec![a, b]);
        assert!(matches!(result, Err(CartInvariantError::MixedVendors { .. })));
    }

    #[test]
    fn test_from_lines_rejects_fields_items_would_reject() {
        let mut negative = CartLine::from_item(&item("P1", "V1", 10), Quantity::ONE);
        negative.unit_price = Decimal::from(-5);
        assert!(matches!(
            Cart::from_lines(vec![negative]),
            Err(CartInvariantError::InvalidLine {
                source: ItemError::NegativePrice(_),
                ..
            })
        ));

        let mut blank_vendor = CartLine::from_item(&item("P1", "V1", 10), Quantity::ONE);
        blank_vendor.vendor_id = VendorId::new("  ");
        assert!(matches!(
            Cart::from_lines(vec![blank_vendor]),
            Err(CartInvariantError::InvalidLine {
                source: ItemError::BlankId("vendorId"),
                ..
            })
        ));
    }

    #[test]
    fn test_serializes_as_line_array() {
        let cart = Cart::new().with_item(&item("P1", "V1", 10), 1).unwrap().cart;
        let value = serde_json::to_value(&cart).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["itemId"], "P1");
    }
}
