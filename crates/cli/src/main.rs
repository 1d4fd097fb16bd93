//! Tiffin CLI - Drive a persisted cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two thalis from vendor V1
//! tiffin cart add -i P1 -v V1 -p 120 -n "Veg Thali" -c Lunch -q 2
//!
//! # Remove one again
//! tiffin cart remove -i P1
//!
//! # Pick delivery details
//! tiffin delivery address --id home --label Home --address "12 MG Road"
//! tiffin delivery days mon wed fri
//! tiffin delivery slot --id s1 --category Lunch --start 12:30 --end 13:30
//!
//! # Print the order payload and clear the cart
//! tiffin checkout
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, clear, and list categories
//! - `delivery` - Select address, days, and slots
//! - `checkout` - Emit the checkout payload and clear the cart
//! - `logout` - Discard the cart and all selections
//!
//! State lives in `TIFFIN_DATA_DIR` (default `.tiffin`), or `--data-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::{NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tiffin_storefront::{CartManager, FileStore, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "tiffin")]
#[command(author, version, about = "Tiffin cart client")]
struct Cli {
    /// Directory holding persisted cart state (overrides `TIFFIN_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change cart contents
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Choose delivery address, days, and slots
    Delivery {
        #[command(subcommand)]
        action: DeliveryAction,
    },
    /// Print the checkout payload and clear the cart
    Checkout {
        /// Print the payload but keep the cart
        #[arg(long)]
        dry_run: bool,
    },
    /// Discard the cart and every selection
    Logout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add units of an item (negative quantity removes units)
    Add {
        /// Item ID
        #[arg(short, long)]
        item: String,

        /// Vendor ID
        #[arg(short, long)]
        vendor: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Category label (e.g. Lunch)
        #[arg(short, long)]
        category: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i32,

        /// Clear the cart first if the item is from another vendor
        #[arg(long)]
        replace: bool,
    },
    /// Add an item described as JSON (as the app would send it)
    AddJson {
        /// Item record, e.g. '{"itemId":"P1","vendorId":"V1","unitPrice":100}'
        json: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i32,

        /// Clear the cart first if the item is from another vendor
        #[arg(long)]
        replace: bool,
    },
    /// Remove one unit of an item
    Remove {
        /// Item ID
        #[arg(short, long)]
        item: String,
    },
    /// Empty the cart and every delivery selection
    Clear,
    /// List the categories present in the cart
    Categories,
}

#[derive(Subcommand)]
enum DeliveryAction {
    /// Select the delivery address
    Address {
        /// Address ID
        #[arg(long)]
        id: String,

        /// Short label, e.g. Home
        #[arg(long)]
        label: String,

        /// Full address text
        #[arg(long)]
        address: String,

        /// Latitude
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    /// Select delivery weekdays (none clears the selection)
    Days {
        /// Weekdays such as mon, tue, wednesday
        #[arg(value_parser = parse_weekday)]
        days: Vec<Weekday>,
    },
    /// Select a delivery slot for one category
    Slot {
        /// Slot ID
        #[arg(long)]
        id: String,

        /// Category the slot serves
        #[arg(long)]
        category: String,

        /// Window start (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,

        /// Window end (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },
    /// Show the current selections
    Show,
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("invalid weekday: {s}"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time (expected HH:MM): {s}"))
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tiffin=info,tiffin_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = FileStore::open(&config.data_dir)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Opened cart store");
    let mut manager = CartManager::with_config(store, &config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { json } => commands::cart::show(&manager, json)?,
            CartAction::Add {
                item,
                vendor,
                price,
                name,
                category,
                image,
                quantity,
                replace,
            } => {
                let item = commands::cart::build_item(
                    &item,
                    &vendor,
                    price,
                    &name,
                    category.as_deref(),
                    image.as_deref(),
                )?;
                commands::cart::add(&mut manager, &item, quantity, replace)?;
            }
            CartAction::AddJson {
                json,
                quantity,
                replace,
            } => {
                let item = commands::cart::parse_item_json(&json)?;
                commands::cart::add(&mut manager, &item, quantity, replace)?;
            }
            CartAction::Remove { item } => commands::cart::remove(&mut manager, &item)?,
            CartAction::Clear => commands::cart::clear(&mut manager)?,
            CartAction::Categories => commands::cart::categories(&manager),
        },
        Commands::Delivery { action } => match action {
            DeliveryAction::Address {
                id,
                label,
                address,
                lat,
                lng,
            } => commands::delivery::address(&mut manager, &id, &label, &address, lat.zip(lng))?,
            DeliveryAction::Days { days } => commands::delivery::days(&mut manager, &days)?,
            DeliveryAction::Slot {
                id,
                category,
                start,
                end,
            } => commands::delivery::slot(&mut manager, &id, &category, start, end)?,
            DeliveryAction::Show => commands::delivery::show(&manager),
        },
        Commands::Checkout { dry_run } => commands::checkout::checkout(&mut manager, dry_run)?,
        Commands::Logout => manager.logout()?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_quantity() {
        let cli = Cli::try_parse_from([
            "tiffin", "cart", "add", "-i", "P1", "-v", "V1", "-p", "100", "-q", "-1",
        ])
        .unwrap();
        let Commands::Cart {
            action: CartAction::Add { quantity, .. },
        } = cli.command
        else {
            panic!("expected cart add");
        };
        assert_eq!(quantity, -1);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("mon").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("Friday").unwrap(), Weekday::Fri);
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("12:30").unwrap(),
            NaiveTime::from_hms_opt(12, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("07:05:30").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 30).unwrap()
        );
        assert!(parse_time("noon").is_err());
    }
}
