//! Reloading cart state from a file-backed store.

#![allow(clippy::unwrap_used)]

use std::fs;

use rust_decimal::Decimal;
use tempfile::TempDir;
use tiffin_core::storage::keys;
use tiffin_core::{CartItem, ItemId, KeyValueStore, VendorId};
use tiffin_storefront::{CartManager, FileStore};

fn open(dir: &TempDir) -> CartManager<FileStore> {
    CartManager::load(FileStore::open(dir.path()).unwrap())
}

#[test]
fn test_reload_reproduces_cart() {
    let dir = TempDir::new().unwrap();
    let mut manager = open(&dir);
    let thali = CartItem::new("P1", "V1", Decimal::new(12050, 2))
        .unwrap()
        .with_name("Veg Thali")
        .with_category("Lunch");
    let dosa = CartItem::new("P2", "V1", Decimal::from(60))
        .unwrap()
        .with_name("Masala Dosa")
        .with_category("Breakfast");
    manager.add_to_cart(&thali, 2).unwrap();
    manager.add_to_cart(&dosa, 1).unwrap();
    let before = manager.cart().clone();
    drop(manager);

    let reloaded = open(&dir);

    assert_eq!(reloaded.cart(), &before);
    assert_eq!(reloaded.cart().total_quantity(), 3);
    assert_eq!(reloaded.cart().subtotal(), Decimal::new(30100, 2));
}

#[test]
fn test_corrupt_cart_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cart.json"), "{not json").unwrap();

    let manager = open(&dir);

    assert!(manager.cart().is_empty());
}

#[test]
fn test_mixed_vendor_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let raw = r#"[
        {"itemId":"P1","vendorId":"V1","quantity":1,"unitPrice":"10"},
        {"itemId":"P2","vendorId":"V2","quantity":1,"unitPrice":"20"}
    ]"#;
    fs::write(dir.path().join("cart.json"), raw).unwrap();

    let manager = open(&dir);

    assert!(manager.cart().is_empty());
}

#[test]
fn test_negative_price_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let raw = r#"[{"itemId":"P1","vendorId":"V1","quantity":1,"unitPrice":"-10"}]"#;
    fs::write(dir.path().join("cart.json"), raw).unwrap();

    let manager = open(&dir);

    assert!(manager.cart().is_empty());
}

#[test]
fn test_numeric_ids_load_as_strings() {
    let dir = TempDir::new().unwrap();
    let raw = r#"[{"itemId":17,"vendorId":3,"quantity":2,"unitPrice":"49.50","name":"Idli"}]"#;
    fs::write(dir.path().join("cart.json"), raw).unwrap();

    let manager = open(&dir);
    let line = manager.cart().line(&ItemId::new("17")).unwrap();

    assert_eq!(line.vendor_id, VendorId::new("3"));
    assert_eq!(line.quantity.get(), 2);
    assert_eq!(manager.cart().subtotal(), Decimal::from(99));
}

#[test]
fn test_clear_removes_files() {
    let dir = TempDir::new().unwrap();
    let mut manager = open(&dir);
    manager
        .add_to_cart(&CartItem::new("P1", "V1", Decimal::ONE).unwrap(), 1)
        .unwrap();
    assert!(dir.path().join("cart.json").exists());

    manager.clear_cart().unwrap();

    for key in keys::ALL {
        assert_eq!(manager.store().get(key).unwrap(), None);
    }
    assert!(open(&dir).cart().is_empty());
}
