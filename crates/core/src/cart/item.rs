//! Item descriptors and the validation boundary for adding to a cart.
//!
//! Menu cards, search results, and reorder screens all hand the cart slightly
//! different shapes. [`CartItemInput`] accepts any of them; [`CartItem::parse`]
//! is the single place they are checked and normalized.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, VendorId};

/// Errors that can occur when validating a [`CartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// A required field was absent.
    #[error("item is missing required field `{0}`")]
    MissingField(&'static str),
    /// An ID field was present but empty.
    #[error("item field `{0}` cannot be blank")]
    BlankId(&'static str),
    /// The unit price is below zero.
    #[error("item price cannot be negative (got {0})")]
    NegativePrice(Decimal),
}

/// Loosely-typed item record as produced by the UI or the backend.
///
/// Every field is optional here; accepted aliases cover the field names
/// different producers use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    #[serde(default, alias = "id", alias = "_id")]
    pub item_id: Option<ItemId>,
    #[serde(default, alias = "vendor")]
    pub vendor_id: Option<VendorId>,
    #[serde(default, alias = "price")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Display-only fields carried through the cart untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDisplay {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated item, ready to become a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub item_id: ItemId,
    pub vendor_id: VendorId,
    /// Price snapshot at the time of adding. Never re-fetched.
    pub unit_price: Decimal,
    pub display: ItemDisplay,
}

impl CartItem {
    /// Create an item with empty display fields.
    ///
    /// # Errors
    ///
    /// Returns an error if either ID is blank or the price is negative.
    pub fn new(
        item_id: impl Into<ItemId>,
        vendor_id: impl Into<VendorId>,
        unit_price: Decimal,
    ) -> Result<Self, ItemError> {
        let item_id = item_id.into();
        let vendor_id = vendor_id.into();
        check_fields(&item_id, &vendor_id, unit_price)?;
        Ok(Self {
            item_id,
            vendor_id,
            unit_price,
            display: ItemDisplay::default(),
        })
    }

    /// Validate a loosely-typed input record.
    ///
    /// # Errors
    ///
    /// Returns an error if `itemId`, `vendorId`, or `unitPrice` is missing,
    /// if an ID is blank, or if the price is negative.
    pub fn parse(input: CartItemInput) -> Result<Self, ItemError> {
        let item_id = input.item_id.ok_or(ItemError::MissingField("itemId"))?;
        let vendor_id = input.vendor_id.ok_or(ItemError::MissingField("vendorId"))?;
        let unit_price = input
            .unit_price
            .ok_or(ItemError::MissingField("unitPrice"))?;

        let mut item = Self::new(item_id, vendor_id, unit_price)?;
        item.display = ItemDisplay {
            name: normalize_text(input.name).unwrap_or_default(),
            image: normalize_text(input.image),
            category: normalize_text(input.category),
        };
        Ok(item)
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.display.name = name.trim().to_owned();
        self
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.display.category = normalize_text(Some(category.to_owned()));
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: &str) -> Self {
        self.display.image = normalize_text(Some(image.to_owned()));
        self
    }
}

impl TryFrom<CartItemInput> for CartItem {
    type Error = ItemError;

    fn try_from(input: CartItemInput) -> Result<Self, Self::Error> {
        Self::parse(input)
    }
}

/// Reject blank IDs and negative prices.
pub(crate) fn check_fields(
    item_id: &ItemId,
    vendor_id: &VendorId,
    unit_price: Decimal,
) -> Result<(), ItemError> {
    if item_id.is_blank() {
        return Err(ItemError::BlankId("itemId"));
    }
    if vendor_id.is_blank() {
        return Err(ItemError::BlankId("vendorId"));
    }
    if unit_price < Decimal::ZERO {
        return Err(ItemError::NegativePrice(unit_price));
    }
    Ok(())
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
