//! # Seed Data Generator
//!
//! Populates a development database with reference data and sample sales.
//!
//! ## Usage
//! ```bash
//! # Seed ./cafe.db (default)
//! cargo run -p cafe-db --bin seed
//!
//! # Specify database path
//! cargo run -p cafe-db --bin seed -- --db ./data/cafe.db
//!
//! # Drop existing sales and recreate the samples
//! cargo run -p cafe-db --bin seed -- --reset
//! ```
//!
//! ## Generated Data
//! - Payment methods: Cash, Mobile Banking, Card, Digital Wallet
//! - Categories: Coffee, Tea, Snacks, Cold Drinks, Breakfast, Lunch,
//!   Desserts, Beverages
//! - A menu mixing made-to-order and stocked items
//! - 20 sample sales, 5 per day over the last four days
//!
//! Reference data is matched by name, so re-running never duplicates it.
//! Sample sales are only created when the sales table is empty.

use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::env;

use cafe_core::{
    Category, NewCategory, NewPaymentMethod, NewProduct, NewSale, PaymentMethod, Product,
    ProductType,
};
use cafe_db::{Database, DbConfig, DbError, ProductFilter};

const PAYMENT_METHODS: &[&str] = &["Cash", "Mobile Banking", "Card", "Digital Wallet"];

const CATEGORIES: &[&str] = &[
    "Coffee",
    "Tea",
    "Snacks",
    "Cold Drinks",
    "Breakfast",
    "Lunch",
    "Desserts",
    "Beverages",
];

/// (name, category, stockable, price in cents, stock, min stock, quick action)
const MENU: &[(&str, &str, bool, i64, i64, i64, bool)] = &[
    ("Espresso", "Coffee", false, 15000, 0, 0, true),
    ("Cappuccino", "Coffee", false, 22000, 0, 0, true),
    ("Latte", "Coffee", false, 24000, 0, 0, true),
    ("Americano", "Coffee", false, 18000, 0, 0, false),
    ("Mocha", "Coffee", false, 26000, 0, 0, false),
    ("Green Tea", "Tea", false, 8000, 0, 0, true),
    ("Chai Latte", "Tea", false, 12000, 0, 0, false),
    ("Croissant", "Snacks", true, 12000, 40, 5, true),
    ("Chocolate Cookie", "Snacks", true, 6000, 60, 10, false),
    ("Coca Cola", "Cold Drinks", true, 5000, 48, 12, false),
    ("Orange Juice", "Cold Drinks", true, 9000, 24, 6, false),
    ("Pancakes", "Breakfast", false, 20000, 0, 0, false),
    ("Omelette", "Breakfast", false, 15000, 0, 0, false),
    ("Chicken Rice", "Lunch", false, 35000, 0, 0, false),
    ("Vegetable Curry", "Lunch", false, 28000, 0, 0, false),
    ("Cheesecake", "Desserts", true, 30000, 12, 3, false),
    ("Brownie", "Desserts", true, 10000, 20, 4, false),
    ("Mineral Water", "Beverages", true, 2500, 100, 20, false),
];

const SAMPLE_SALES: usize = 20;
const SALES_PER_DAY: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cafe.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => reset = true,
            "--help" | "-h" => {
                println!("Cafe POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cafe.db)");
                println!("  -r, --reset        Delete existing sales before seeding");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("🌱 Cafe POS Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if reset {
        let deleted = db.sales().delete_all().await?;
        println!("✓ Deleted {} existing sales", deleted);
    }

    let methods = seed_payment_methods(&db).await?;
    println!("✓ {} payment methods", methods.len());

    let categories = seed_categories(&db).await?;
    println!("✓ {} categories", categories.len());

    let products = seed_products(&db, &categories).await?;
    println!("✓ {} products", products.len());

    let existing = db.sales().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sales, skipping samples", existing);
        println!("  Run with --reset to recreate them.");
    } else {
        let created = seed_sales(&db, &products, &methods).await?;
        println!("✓ Created {} sample sales", created);
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

async fn seed_payment_methods(db: &Database) -> Result<Vec<PaymentMethod>, DbError> {
    let repo = db.payment_methods();

    for name in PAYMENT_METHODS {
        if repo.find_by_name(name).await?.is_none() {
            repo.insert(&NewPaymentMethod {
                name: name.to_string(),
                is_active: true,
            })
            .await?;
        }
    }

    repo.list_active().await
}

async fn seed_categories(db: &Database) -> Result<Vec<Category>, DbError> {
    let repo = db.categories();

    for name in CATEGORIES {
        if repo.find_by_name(name).await?.is_none() {
            repo.insert(&NewCategory {
                name: name.to_string(),
                is_active: true,
            })
            .await?;
        }
    }

    repo.list_active().await
}

async fn seed_products(db: &Database, categories: &[Category]) -> Result<Vec<Product>, DbError> {
    let repo = db.products();
    let existing: HashSet<String> = repo
        .list(ProductFilter::All)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();

    for &(name, category, stockable, price_cents, stock, min, quick) in MENU {
        if existing.contains(name) {
            continue;
        }

        let Some(category) = categories.iter().find(|c| c.name == category) else {
            eprintln!("Skipping {}: category {} is inactive or missing", name, category);
            continue;
        };

        let product_type = if stockable {
            ProductType::Stockable
        } else {
            ProductType::NonStockable
        };

        let input = NewProduct {
            name: name.to_string(),
            category_id: category.id.clone(),
            product_type,
            price_cents,
            stock_quantity: stock,
            min_stock_level: min,
            is_quick_action: quick,
            is_active: true,
        };

        match repo.insert(&input).await {
            Ok(_) => {}
            // Exists but deactivated
            Err(DbError::UniqueViolation { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    repo.list(ProductFilter::All).await
}

/// Creates the sample sales through the regular sale path, backdated so
/// that sale `i` lands `i / SALES_PER_DAY` days ago.
async fn seed_sales(
    db: &Database,
    products: &[Product],
    methods: &[PaymentMethod],
) -> Result<usize, DbError> {
    if products.is_empty() || methods.is_empty() {
        return Ok(0);
    }

    let now = Utc::now();
    let mut created = 0;

    for i in 0..SAMPLE_SALES {
        let seed = i * 7 + 3;
        let product = &products[(i * 5 + 1) % products.len()];
        let method = &methods[seed % methods.len()];
        let quantity = (seed % 5 + 1) as i64;

        let days_ago = (i / SALES_PER_DAY) as i64;
        let created_at = now - Duration::days(days_ago) - Duration::minutes((seed % 90) as i64);

        let request = NewSale {
            product_id: Some(product.id.clone()),
            quantity,
            payment_method_id: method.id.clone(),
            customer_name: if seed % 2 == 0 {
                format!("Customer {}", i + 1)
            } else {
                String::new()
            },
            customer_phone: if seed % 3 == 0 {
                format!("01{:09}", 700_000_000 + seed * 12_345)
            } else {
                String::new()
            },
            notes: if seed % 4 == 1 {
                format!("Sample sale {}", i + 1)
            } else {
                String::new()
            },
            ..Default::default()
        };

        match db.sales().create_at(&request, created_at).await {
            Ok(_) => created += 1,
            // A stocked item can run out; the seed skips it like a cashier would
            Err(DbError::Domain(e)) => eprintln!("Skipped sample sale {}: {}", i + 1, e),
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}
