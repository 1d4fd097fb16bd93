//! Delivery selections chosen while checking out.
//!
//! These are only meaningful alongside cart contents; the storefront clears
//! them together with the cart.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::id::{AddressId, SlotId};

/// Address the order should be delivered to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    /// Backend address ID.
    pub id: AddressId,
    /// Short label such as "Home" or "Office".
    pub label: String,
    /// Free-text address as entered by the customer.
    pub address: String,
    /// Latitude from the maps picker, if the customer used it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude from the maps picker, if the customer used it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Errors that can occur when building a [`DeliverySlot`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The slot has no category to attach to.
    #[error("slot category cannot be empty")]
    EmptyCategory,
    /// The window closes before (or when) it opens.
    #[error("slot must start before it ends ({starts_at} >= {ends_at})")]
    EmptyWindow {
        /// Opening time.
        starts_at: NaiveTime,
        /// Closing time.
        ends_at: NaiveTime,
    },
}

/// A recurring delivery window for one category of food.
///
/// A cart holding both "lunch" and "dinner" items needs one slot per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlot {
    /// Backend slot ID.
    pub id: SlotId,
    /// Category label this slot serves, matched against cart line categories.
    pub category: String,
    /// Window opening time.
    pub starts_at: NaiveTime,
    /// Window closing time.
    pub ends_at: NaiveTime,
}

impl DeliverySlot {
    /// Build a slot, validating the category and window.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is blank or `starts_at >= ends_at`.
    pub fn new(
        id: SlotId,
        category: &str,
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    ) -> Result<Self, SlotError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(SlotError::EmptyCategory);
        }
        if starts_at >= ends_at {
            return Err(SlotError::EmptyWindow { starts_at, ends_at });
        }
        Ok(Self {
            id,
            category: category.to_owned(),
            starts_at,
            ends_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_slot_valid() {
        let slot = DeliverySlot::new(SlotId::new("s1"), " Lunch ", time(12, 0), time(13, 0)).unwrap();
        assert_eq!(slot.category, "Lunch");
    }

    #[test]
    fn test_slot_rejects_empty_window() {
        let result = DeliverySlot::new(SlotId::new("s1"), "Lunch", time(13, 0), time(13, 0));
        assert!(matches!(result, Err(SlotError::EmptyWindow { .. })));
    }

    #[test]
    fn test_slot_rejects_blank_category() {
        let result = DeliverySlot::new(SlotId::new("s1"), "  ", time(8, 0), time(9, 0));
        assert_eq!(result, Err(SlotError::EmptyCategory));
    }

    #[test]
    fn test_address_skips_missing_coordinates() {
        let address = DeliveryAddress {
            id: AddressId::new("a1"),
            label: "Home".to_owned(),
            address: "12 MG Road".to_owned(),
            latitude: None,
            longitude: None,
        };
        let json = serde_json::to_string(&address).unwrap();
        assert!(!json.contains("latitude"));
        let parsed: DeliveryAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address);
    }
}
