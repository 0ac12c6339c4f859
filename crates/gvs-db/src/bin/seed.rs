//! # Seed Data Generator
//!
//! Populates the database with test clients and products for development,
//! then submits one demonstration sale through the checkout coordinator.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p gvs-db --bin seed
//!
//! # Custom product count
//! cargo run -p gvs-db --bin seed -- --products 500
//!
//! # Specify database path
//! cargo run -p gvs-db --bin seed -- --db ./data/gvs.db
//! ```
//!
//! ## Generated Data
//! - Clients: fixed roster of realistic names with unique DNIs
//! - Products: `{CATEGORY}-{INDEX}` codes across a handful of categories,
//!   prices 1.99-19.99, stock 0-100
//! - One completed sale against the first client, to verify the checkout
//!   path end to end

use chrono::Utc;
use gvs_core::{LineDraft, NewClient, NewProduct, SaleDraft};
use gvs_db::{Database, DbConfig};
use std::env;

/// Fixed client roster: (name, surname, dni, phone, address)
const CLIENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("Ana", "Garcia Lopez", "12345678Z", "600111222", "C/ Mayor 1, Madrid"),
    ("Luis", "Martinez Ruiz", "23456789D", "600222333", "Av. Sol 14, Sevilla"),
    ("Carmen", "Fernandez Gil", "34567890V", "600333444", "Pl. Norte 3, Bilbao"),
    ("Jorge", "Sanchez Vega", "45678901B", "600444555", "C/ Rio 22, Valencia"),
    ("Lucia", "Torres Marin", "56789012N", "600555666", "Av. Mar 8, Malaga"),
];

/// Product categories with base descriptions
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "FERR",
        &[
            "Hammer", "Screwdriver Set", "Adjustable Wrench", "Pliers", "Hand Saw",
            "Tape Measure", "Spirit Level", "Utility Knife", "Chisel Set", "Allen Keys",
        ],
    ),
    (
        "ELEC",
        &[
            "LED Bulb 9W", "Extension Cord 5m", "Wall Socket", "Light Switch", "Cable Reel",
            "Multimeter", "Insulating Tape", "Junction Box", "Dimmer", "Doorbell Kit",
        ],
    ),
    (
        "PINT",
        &[
            "White Paint 5L", "Primer 1L", "Roller Set", "Brush Pack", "Masking Tape",
            "Paint Tray", "Varnish 750ml", "Sandpaper Pack", "Filler Tube", "Drop Cloth",
        ],
    ),
    (
        "JARD",
        &[
            "Garden Hose 15m", "Pruning Shears", "Trowel", "Watering Can", "Plant Pots x3",
            "Potting Soil 20L", "Gloves Pair", "Rake", "Sprinkler", "Seed Assortment",
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 200;
    let mut db_path = String::from("./gvs_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("GVS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>     Database file path (default: ./gvs_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 GVS Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!("Products: {}", product_count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Insert clients
    println!();
    println!("Inserting clients...");

    let mut client_ids = Vec::new();
    for (name, surname, dni, phone, address) in CLIENTS {
        let new_client = NewClient {
            name: name.to_string(),
            surname: surname.to_string(),
            dni: dni.to_string(),
            phone: Some(phone.to_string()),
            home_address: address.to_string(),
            shipping_address: address.to_string(),
        };
        gvs_core::validation::validate_new_client(&new_client)?;
        let client = db.clients().insert(&new_client).await?;
        client_ids.push(client.id);
    }
    println!("✓ Inserted {} clients", client_ids.len());

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0usize;
    let mut first_product_id = None;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category_code, descriptions)) in CATEGORIES.iter().enumerate() {
        for variant in 0..(product_count / CATEGORIES.len() + 1) {
            for (desc_idx, description) in descriptions.iter().enumerate() {
                if generated >= product_count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + variant * descriptions.len() + desc_idx;
                let new_product = generate_product(category_code, description, variant, seed);

                if let Err(e) = gvs_core::validation::validate_new_product(&new_product) {
                    eprintln!("Skipping {}: {}", new_product.code, e);
                    continue;
                }

                match db.products().insert(&new_product).await {
                    Ok(product) => {
                        if first_product_id.is_none() && product.stock >= 10 {
                            first_product_id = Some((product.id, product.recommended_price_cents));
                        }
                        generated += 1;
                    }
                    Err(e) => {
                        eprintln!("Failed to insert {}: {}", new_product.code, e);
                    }
                }

                if generated % 100 == 0 && generated > 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Submit a demonstration sale through the checkout coordinator
    if let (Some(&client_id), Some((product_id, price_cents))) =
        (client_ids.first(), first_product_id)
    {
        println!();
        println!("Submitting demonstration sale...");

        let draft = SaleDraft {
            client_id,
            sale_date: Utc::now().date_naive(),
            global_discount_pct: 5,
            notes: Some("Seed demo sale".to_string()),
            lines: vec![LineDraft {
                product_id,
                quantity: 2,
                unit_price_cents: price_cents,
                discount_pct: 0,
            }],
        };

        match db.checkout().submit(draft).await {
            Ok(receipt) => {
                println!(
                    "✓ Sale #{} committed, total {}",
                    receipt.sale_id,
                    receipt.total()
                );
            }
            Err(e) => eprintln!("✗ Demo sale failed: {}", e),
        }
    }

    // Low-stock overview
    let low = db.products().list_low_stock().await?;
    println!();
    println!("Low-stock products: {}", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic pseudo-random data.
fn generate_product(category: &str, description: &str, variant: usize, seed: usize) -> NewProduct {
    let code = format!("{}-{:04}", category, seed);

    // Price 1.99 - 19.99, nudged by variant so repeats differ
    let price_cents = 199 + ((seed * 37 + variant * 211) % 1800) as i64;

    // Stock 0-100, minimum threshold 5-20
    let stock = (seed * 13 % 101) as i64;
    let min_stock = 5 + (seed % 16) as i64;

    let full_description = if variant == 0 {
        description.to_string()
    } else {
        format!("{} v{}", description, variant + 1)
    };

    NewProduct {
        code,
        description: full_description,
        recommended_price_cents: price_cents,
        stock,
        min_stock,
    }
}
