//! Checkout command.
//!
//! Prints the payload the backend would receive. Without `--dry-run` the cart
//! is cleared afterwards, as it is once the backend accepts an order.

use tiffin_core::KeyValueStore;
use tiffin_storefront::CartManager;

use super::CommandError;
use crate::output;

/// Emit the checkout payload, then clear the cart unless `dry_run`.
///
/// # Errors
///
/// Returns an error if the cart is not ready to check out or cannot be
/// cleared.
pub fn checkout<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    dry_run: bool,
) -> Result<(), CommandError> {
    let payload = manager.checkout_payload()?;
    output::json(&payload)?;

    if dry_run {
        tracing::info!("Dry run, cart kept");
    } else {
        manager.complete_checkout()?;
    }
    Ok(())
}
