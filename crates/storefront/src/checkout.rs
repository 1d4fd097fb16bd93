//! Checkout hand-off.
//!
//! Assembles the payload the backend receives when the customer places an
//! order. Only completeness is checked here; the backend decides pricing,
//! delivery-area eligibility, and whether the wallet covers the order.

use chrono::Weekday;
use serde::Serialize;
use thiserror::Error;
use tiffin_core::{CartLine, DeliveryAddress, DeliverySlot, KeyValueStore, Price, VendorId};
use tracing::{info, instrument};

use crate::error::Result;
use crate::manager::CartManager;

/// Reasons the cart is not ready to check out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No delivery address selected")]
    MissingAddress,

    #[error("No delivery days selected")]
    MissingSchedule,

    #[error("No delivery slot selected for {category}")]
    MissingSlot { category: String },
}

/// Order request sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub vendor_id: VendorId,
    pub lines: Vec<CartLine>,
    pub total_quantity: u64,
    pub subtotal: Price,
    pub address: DeliveryAddress,
    pub days: Vec<Weekday>,
    pub slots: Vec<DeliverySlot>,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Build the checkout payload from the cart and its selections.
    ///
    /// Slots for categories no longer in the cart are left out.
    ///
    /// # Errors
    ///
    /// Returns the first missing prerequisite: contents, address, days, or a
    /// slot for each category in the cart.
    pub fn checkout_payload(&self) -> std::result::Result<CheckoutPayload, CheckoutError> {
        let vendor_id = self
            .cart()
            .vendor()
            .cloned()
            .ok_or(CheckoutError::EmptyCart)?;
        let address = self
            .selected_address()
            .ok_or(CheckoutError::MissingAddress)?;

        let days = self.selected_days();
        if days.is_empty() {
            return Err(CheckoutError::MissingSchedule);
        }

        let slots = self.relevant_slots();
        if let Some(category) = self
            .cart_categories()
            .into_iter()
            .find(|category| !slots.iter().any(|slot| &slot.category == category))
        {
            return Err(CheckoutError::MissingSlot { category });
        }

        let summary = self.summary();
        Ok(CheckoutPayload {
            vendor_id,
            lines: self.cart().lines().to_vec(),
            total_quantity: summary.total_quantity,
            subtotal: summary.subtotal,
            address,
            days,
            slots,
        })
    }

    /// Clear the cart once the backend has accepted the order.
    ///
    /// # Errors
    ///
    /// Returns an error if a key cannot be removed from the store.
    #[instrument(skip(self))]
    pub fn complete_checkout(&mut self) -> Result<()> {
        info!(
            total_quantity = self.cart().total_quantity(),
            "Checkout accepted, clearing cart"
        );
        self.clear_cart()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use tiffin_core::{AddressId, CartItem, CurrencyCode, SlotId};

    use super::*;
    use crate::stores::MemoryStore;

    fn slot(id: &str, category: &str) -> DeliverySlot {
        DeliverySlot::new(
            SlotId::new(id),
            category,
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
        )
        .unwrap()
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            id: AddressId::new("office"),
            label: "Office".to_owned(),
            address: "4th Floor, Tech Park".to_owned(),
            latitude: None,
            longitude: None,
        }
    }

    fn manager_with_lunch() -> CartManager<MemoryStore> {
        let mut manager = CartManager::load(MemoryStore::new());
        let thali = CartItem::new("P1", "V1", Decimal::from(120))
            .unwrap()
            .with_category("Lunch");
        let outcome = manager.add_to_cart(&thali, 2).unwrap();
        assert!(!outcome.is_conflict());
        manager
    }

    #[test]
    fn test_empty_cart() {
        let manager = CartManager::load(MemoryStore::new());
        assert_eq!(manager.checkout_payload(), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn test_missing_prerequisites_in_order() {
        let mut manager = manager_with_lunch();
        assert_eq!(manager.checkout_payload(), Err(CheckoutError::MissingAddress));

        manager.select_address(&address()).unwrap();
        assert_eq!(manager.checkout_payload(), Err(CheckoutError::MissingSchedule));

        manager.select_days(&[Weekday::Mon, Weekday::Tue]).unwrap();
        assert_eq!(
            manager.checkout_payload(),
            Err(CheckoutError::MissingSlot {
                category: "Lunch".to_owned()
            })
        );
    }

    #[test]
    fn test_complete_payload() {
        let mut manager = manager_with_lunch();
        manager.select_address(&address()).unwrap();
        manager.select_days(&[Weekday::Wed]).unwrap();
        manager.select_slot(slot("s1", "Lunch")).unwrap();
        manager.select_slot(slot("s2", "Dinner")).unwrap();

        let payload = manager.checkout_payload().unwrap();
        assert_eq!(payload.vendor_id, VendorId::new("V1"));
        assert_eq!(payload.total_quantity, 2);
        assert_eq!(payload.subtotal, Price::new(Decimal::from(240), CurrencyCode::INR));
        assert_eq!(payload.slots.len(), 1);
        assert_eq!(payload.slots[0].id, SlotId::new("s1"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["vendorId"], "V1");
        assert_eq!(json["days"][0], "Wed");
        assert_eq!(json["lines"][0]["quantity"], 2);
    }

    #[test]
    fn test_complete_checkout_clears_everything() {
        let mut manager = manager_with_lunch();
        manager.select_address(&address()).unwrap();
        manager.complete_checkout().unwrap();

        assert!(manager.cart().is_empty());
        assert!(manager.selected_address().is_none());
        assert!(manager.store().is_empty());
    }
}
