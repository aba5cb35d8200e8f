//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (./rentdesk_dev.db)
//! cargo run -p rentdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p rentdesk-db --bin seed -- --db ./data/rentdesk.db
//! ```
//!
//! ## Generated Data
//! - The utensil catalog the shop actually rents (knives, stock pots,
//!   serving trays, gas stoves, ...)
//! - A handful of customers
//! - Two delivery vehicles
//!
//! Seeding is additive and not idempotent: running it twice inserts
//! duplicate products and customers. Use a fresh database file.

use std::env;

use rentdesk_core::RateUnit;
use rentdesk_db::repository::customer::CustomerInput;
use rentdesk_db::repository::product::ProductInput;
use rentdesk_db::{Database, DbConfig};

/// Catalog entries: (name, stock, rate in paise per day).
const CATALOG: &[(&str, i64, i64)] = &[
    ("Chef's Knife", 25, 15000),
    ("Cutting Board (Large)", 40, 7000),
    ("Stock Pot 50L", 12, 35000),
    ("Biryani Handi 30L", 18, 28000),
    ("Serving Tray (Steel)", 120, 2500),
    ("Gas Stove (Double Burner)", 10, 45000),
    ("Tandoor (Charcoal)", 4, 90000),
    ("Idli Steamer (6 Plate)", 15, 18000),
    ("Dosa Tawa (Heavy)", 20, 12000),
    ("Water Dispenser 20L", 30, 9000),
    ("Dinner Plate Set (x50)", 60, 20000),
    ("Steel Tumbler Set (x50)", 60, 10000),
    ("Chafing Dish", 35, 22000),
    ("Ladle Set", 50, 4000),
    ("Mixer Grinder (Commercial)", 8, 40000),
];

/// Customers: (name, phone, address).
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Asha Devi", "9876543210", "12 Market Road"),
    ("Ravi Kumar", "9812345678", "4 Temple Street"),
    ("Meena Caterers", "9900112233", "Plot 7, Industrial Area"),
    ("Suresh Babu", "9844556677", "22 Lake View Colony"),
];

/// Vehicles: (number, type).
const VEHICLES: &[(&str, &str)] = &[
    ("KA-01-AB-1234", "Tempo"),
    ("KA-02-CD-5678", "Pickup Van"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut db_path = "./rentdesk_dev.db".to_string();

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if let Some(path) = args.get(i + 1) {
                    db_path = path.clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("RentalDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rentdesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 RentalDesk Seed Data Generator");
    println!("   Database: {db_path}");
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    for (name, stock, rate_paise) in CATALOG {
        db.products()
            .create(&ProductInput {
                name: name.to_string(),
                quantity: *stock,
                rate_paise: *rate_paise,
                rate_unit: RateUnit::Day,
            })
            .await?;
    }
    println!("   ✓ {} products", CATALOG.len());

    for (name, phone, address) in CUSTOMERS {
        db.customers()
            .create(&CustomerInput {
                name: name.to_string(),
                phone: phone.to_string(),
                address: Some(address.to_string()),
                aadhar: None,
                referred_by: None,
            })
            .await?;
    }
    println!("   ✓ {} customers", CUSTOMERS.len());

    for (number, vehicle_type) in VEHICLES {
        db.vehicles().create(number, Some(vehicle_type)).await?;
    }
    println!("   ✓ {} vehicles", VEHICLES.len());

    db.close().await;
    println!();
    println!("Done.");
    Ok(())
}
