//! A single line in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::{CartItem, ItemDisplay};
use crate::types::{ItemId, Quantity, VendorId};

/// One distinct item and how many of it the customer wants.
///
/// This is also the persisted record shape: the cart is stored as a JSON
/// array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: ItemId,
    pub vendor_id: VendorId,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    #[serde(flatten)]
    pub display: ItemDisplay,
}

impl CartLine {
    /// Start a line from a validated item.
    #[must_use]
    pub fn from_item(item: &CartItem, quantity: Quantity) -> Self {
        Self {
            item_id: item.item_id.clone(),
            vendor_id: item.vendor_id.clone(),
            quantity,
            unit_price: item.unit_price,
            display: item.display.clone(),
        }
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }

    /// Category label, if the item has one.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.display.category.as_deref()
    }
}
