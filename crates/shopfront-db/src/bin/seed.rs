//! # Seed Data Loader
//!
//! Populates a database with the demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./shopfront.db (default)
//! cargo run -p shopfront-db --bin seed
//!
//! # Specify database path
//! cargo run -p shopfront-db --bin seed -- --db ./data/shopfront.db
//! ```
//!
//! Inserts two customers, three products and two historical orders.
//! Does nothing if the database already has products.

use std::env;

use shopfront_db::seed::seed_demo_data;
use shopfront_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./shopfront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopfront Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./shopfront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shopfront Demo Data Seeder");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    match seed_demo_data(&db).await? {
        Some(summary) => {
            println!("✓ Inserted {} customers", summary.customers);
            println!("✓ Inserted {} products", summary.products);
            println!("✓ Inserted {} orders", summary.orders);
        }
        None => {
            let existing = db.products().count().await?;
            println!("⚠ Database already has {} products", existing);
            println!("  Skipping seed to avoid duplicates.");
            println!("  Delete the database file to regenerate.");
            return Ok(());
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
