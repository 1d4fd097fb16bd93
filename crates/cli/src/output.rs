//! Terminal rendering. Everything the CLI prints to stdout goes through here.

#![allow(clippy::print_stdout)]

use serde::Serialize;
use tiffin_core::{Cart, DeliveryAddress, DeliverySlot, LineChange, Price};
use tiffin_storefront::CartSummary;

pub fn message(text: &str) {
    println!("{text}");
}

pub fn json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn change(change: &LineChange) {
    match change {
        LineChange::Added { item_id, quantity } => {
            println!("Added {quantity} × {item_id}");
        }
        LineChange::Updated {
            item_id,
            previous,
            current,
        } => println!("{item_id}: {previous} → {current}"),
        LineChange::Removed { item_id, .. } => println!("Removed {item_id}"),
        LineChange::Unchanged { item_id } => println!("{item_id} unchanged"),
    }
}

pub fn summary(summary: &CartSummary) {
    println!(
        "{} item(s), subtotal {}",
        summary.total_quantity, summary.subtotal
    );
}

pub fn cart(cart: &Cart, summary: &CartSummary) {
    let Some(vendor) = &summary.vendor else {
        println!("Cart is empty");
        return;
    };

    println!("Vendor {vendor}");
    let currency = summary.subtotal.currency_code;
    for line in cart.lines() {
        let name = if line.display.name.is_empty() {
            line.item_id.as_str()
        } else {
            line.display.name.as_str()
        };
        let category = line
            .category()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        println!(
            "  {:>3} × {name} ({}){category}  @ {}  = {}",
            line.quantity,
            line.item_id,
            Price::new(line.unit_price, currency),
            Price::new(line.line_total(), currency),
        );
    }
    self::summary(summary);
}

pub fn selections(
    address: Option<&DeliveryAddress>,
    days: &[chrono::Weekday],
    slots: &[DeliverySlot],
) {
    match address {
        Some(address) => println!("Address: {} - {}", address.label, address.address),
        None => println!("Address: (none)"),
    }

    if days.is_empty() {
        println!("Days: (none)");
    } else {
        let names: Vec<String> = days.iter().map(ToString::to_string).collect();
        println!("Days: {}", names.join(", "));
    }

    if slots.is_empty() {
        println!("Slots: (none)");
    }
    for slot in slots {
        println!(
            "Slot: {} {}-{} ({})",
            slot.category,
            slot.starts_at.format("%H:%M"),
            slot.ends_at.format("%H:%M"),
            slot.id
        );
    }
}
