//! Delivery selection commands.
//!
//! Selections are tied to the cart: they need items in the cart and are
//! discarded whenever it is cleared.

use chrono::{NaiveTime, Weekday};
use tiffin_core::{AddressId, DeliveryAddress, DeliverySlot, KeyValueStore, SlotId};
use tiffin_storefront::CartManager;

use super::CommandError;
use crate::output;

/// Select the delivery address.
///
/// # Errors
///
/// Returns an error if the cart is empty or the selection cannot be saved.
pub fn address<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    id: &str,
    label: &str,
    text: &str,
    coordinates: Option<(f64, f64)>,
) -> Result<(), CommandError> {
    let address = DeliveryAddress {
        id: AddressId::new(id),
        label: label.trim().to_owned(),
        address: text.trim().to_owned(),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, lng)| lng),
    };
    manager.select_address(&address)?;
    output::message(&format!("Delivering to {}", address.label));
    Ok(())
}

/// Select delivery weekdays.
///
/// # Errors
///
/// Returns an error if the cart is empty or the selection cannot be saved.
pub fn days<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    days: &[Weekday],
) -> Result<(), CommandError> {
    manager.select_days(days)?;
    let selected = manager.selected_days();
    if selected.is_empty() {
        output::message("Delivery days cleared");
    } else {
        let names: Vec<String> = selected.iter().map(ToString::to_string).collect();
        output::message(&format!("Delivering on {}", names.join(", ")));
    }
    Ok(())
}

/// Select a delivery slot for one category.
///
/// # Errors
///
/// Returns an error if the slot window is invalid, the cart is empty, or the
/// selection cannot be saved.
pub fn slot<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    id: &str,
    category: &str,
    start: NaiveTime,
    end: NaiveTime,
) -> Result<(), CommandError> {
    let slot = DeliverySlot::new(SlotId::new(id), category, start, end)?;
    if !manager.cart_categories().contains(&slot.category) {
        tracing::warn!(category = %slot.category, "No cart items in this category");
    }
    let message = format!(
        "{} slot set to {}-{}",
        slot.category,
        slot.starts_at.format("%H:%M"),
        slot.ends_at.format("%H:%M")
    );
    manager.select_slot(slot)?;
    output::message(&message);
    Ok(())
}

pub fn show<S: KeyValueStore>(manager: &CartManager<S>) {
    output::selections(
        manager.selected_address().as_ref(),
        &manager.selected_days(),
        &manager.selected_slots(),
    );
}
