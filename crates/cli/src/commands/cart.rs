//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! tiffin cart add -i P1 -v V1 -p 120 -n "Veg Thali" -c Lunch
//! tiffin cart add-json '{"id":17,"vendor":3,"price":"49.50","name":"Masala Dosa"}'
//! tiffin cart remove -i P1
//! tiffin cart show --json
//! tiffin cart clear
//! ```

use rust_decimal::Decimal;
use serde_json::json;
use tiffin_core::{CartItem, CartItemInput, ItemId, KeyValueStore};
use tiffin_storefront::{AddOutcome, CartManager};

use super::CommandError;
use crate::output;

/// Build an item from command-line arguments.
///
/// # Errors
///
/// Returns an error if an ID is blank or the price is negative.
pub fn build_item(
    item_id: &str,
    vendor_id: &str,
    price: Decimal,
    name: &str,
    category: Option<&str>,
    image: Option<&str>,
) -> Result<CartItem, CommandError> {
    let mut item = CartItem::new(item_id, vendor_id, price)?.with_name(name);
    if let Some(category) = category {
        item = item.with_category(category);
    }
    if let Some(image) = image {
        item = item.with_image(image);
    }
    Ok(item)
}

/// Parse an item record the way the app would send it.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails item validation.
pub fn parse_item_json(raw: &str) -> Result<CartItem, CommandError> {
    let input: CartItemInput = serde_json::from_str(raw)?;
    Ok(CartItem::parse(input)?)
}

/// Add units of an item, optionally switching vendors on conflict.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub fn add<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    item: &CartItem,
    quantity: i32,
    replace: bool,
) -> Result<(), CommandError> {
    match manager.add_to_cart(item, quantity)? {
        AddOutcome::Applied(change) => output::change(&change),
        AddOutcome::Conflict(conflict) if replace => {
            let change = manager.replace_cart_with(item, quantity)?;
            output::message(&format!(
                "Cleared cart from vendor {}",
                conflict.cart_vendor
            ));
            output::change(&change);
        }
        AddOutcome::Conflict(conflict) => {
            tracing::warn!(%conflict, "Item not added");
            output::message(&format!(
                "Your cart has items from vendor {}. Re-run with --replace to clear it and add {}.",
                conflict.cart_vendor, conflict.item_id
            ));
        }
    }
    output::summary(&manager.summary());
    Ok(())
}

/// Remove one unit of an item.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub fn remove<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    item_id: &str,
) -> Result<(), CommandError> {
    match manager.decrement(&ItemId::new(item_id))? {
        Some(change) => output::change(&change),
        None => output::message(&format!("{item_id} is not in the cart")),
    }
    output::summary(&manager.summary());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be cleared.
pub fn clear<S: KeyValueStore>(manager: &mut CartManager<S>) -> Result<(), CommandError> {
    manager.clear_cart()?;
    output::message("Cart cleared");
    Ok(())
}

/// Print cart contents.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn show<S: KeyValueStore>(manager: &CartManager<S>, as_json: bool) -> Result<(), CommandError> {
    let summary = manager.summary();
    if as_json {
        output::json(&json!({
            "summary": summary,
            "lines": manager.cart(),
        }))?;
    } else {
        output::cart(manager.cart(), &summary);
    }
    Ok(())
}

pub fn categories<S: KeyValueStore>(manager: &CartManager<S>) {
    let categories = manager.cart_categories();
    if categories.is_empty() {
        output::message("No categories in cart");
    }
    for category in categories {
        output::message(&category);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tiffin_core::VendorId;
    use tiffin_storefront::MemoryStore;

    use super::*;

    #[test]
    fn test_build_item() {
        let item = build_item("P1", "V1", Decimal::from(120), "Veg Thali", Some("Lunch"), None).unwrap();
        assert_eq!(item.display.name, "Veg Thali");
        assert_eq!(item.display.category.as_deref(), Some("Lunch"));
    }

    #[test]
    fn test_build_item_rejects_blank_vendor() {
        let result = build_item("P1", "", Decimal::ONE, "", None, None);
        assert!(matches!(result, Err(CommandError::Item(_))));
    }

    #[test]
    fn test_parse_item_json_errors() {
        assert!(matches!(parse_item_json("{"), Err(CommandError::Json(_))));
        assert!(matches!(
            parse_item_json(r#"{"itemId":"P1","vendorId":"V1"}"#),
            Err(CommandError::Item(_))
        ));
    }

    #[test]
    fn test_add_with_replace_switches_vendor() {
        let mut manager = CartManager::load(MemoryStore::new());
        let first = build_item("P1", "V1", Decimal::from(10), "", None, None).unwrap();
        let second = build_item("P2", "V2", Decimal::from(20), "", None, None).unwrap();

        add(&mut manager, &first, 1, false).unwrap();
        add(&mut manager, &second, 1, false).unwrap();
        assert_eq!(manager.cart().vendor(), Some(&VendorId::new("V1")));

        add(&mut manager, &second, 1, true).unwrap();
        assert_eq!(manager.cart().vendor(), Some(&VendorId::new("V2")));
        assert_eq!(manager.cart().total_quantity(), 1);
    }
}
