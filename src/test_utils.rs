//! Shared test utilities for `Stockroom`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{catalog, order, purchase},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category with an empty description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    catalog::create_category(db, name.to_string(), String::new()).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `price`: 10.0
/// * `description`: empty
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
) -> Result<entities::product::Model> {
    catalog::create_product(db, name.to_string(), category_id, 10.0, String::new()).await
}

/// Creates a test supplier with placeholder contact details.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::supplier::Model> {
    catalog::create_supplier(
        db,
        name.to_string(),
        "555-0100".to_string(),
        String::new(),
        String::new(),
    )
    .await
}

/// Builds a purchase line input.
pub fn purchase_line(product_id: i64, quantity: i32, unit_price: f64) -> purchase::PurchaseLineInput {
    purchase::PurchaseLineInput {
        product_id,
        quantity,
        unit_price,
    }
}

/// Builds an order line input.
pub fn order_line(product_id: i64, quantity: i32, unit_price: f64) -> order::OrderLineInput {
    order::OrderLineInput {
        product_id,
        quantity,
        unit_price,
    }
}

/// Places a test order with sensible defaults.
///
/// # Defaults
/// * `order_type`: "dine-in"
/// * `discount`: 0.0, `paid_amount`: 0.0
/// * `grand_total`: sum of line amounts
/// * `created_by`: `"test_user"`
pub async fn create_test_order(
    db: &DatabaseConnection,
    table_no: &str,
    lines: Vec<order::OrderLineInput>,
) -> Result<entities::order::Model> {
    let grand_total = lines
        .iter()
        .map(|line| f64::from(line.quantity) * line.unit_price)
        .sum();

    order::create_order(
        db,
        table_no.to_string(),
        "dine-in".to_string(),
        0.0,
        grand_total,
        0.0,
        "test_user".to_string(),
        lines,
    )
    .await
}

/// Sets up a complete test environment with a category and a product.
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Test Category").await?;
    let product = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, product))
}
