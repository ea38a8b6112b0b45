//! Catalog business logic - categories, products, and suppliers.
//!
//! Pure reference data maintained by catalog administrators. Listings are
//! newest-first. Deleting a product leaves its stock ledger row behind as an
//! orphan; the ledger is history, not catalog data.

use crate::{
    entities::{
        Category, Product, Supplier, category, product, supplier,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Name cannot be empty".to_string(),
        });
    }
    Ok(trimmed)
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            message: format!("Price must be a non-negative number, got {price}"),
        });
    }
    Ok(())
}

// ---- Categories ----

/// Creates a new category.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    description: String,
) -> Result<category::Model> {
    let name = validate_name(&name)?.to_string();

    category::ActiveModel {
        name: Set(name),
        description: Set(description),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Updates a category's name and description.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    name: String,
    description: String,
) -> Result<category::Model> {
    let name = validate_name(&name)?.to_string();

    let existing = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(name);
    active.description = Set(description);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a category; its products go with it.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let existing = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}

/// Retrieves a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all categories, newest first.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_desc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

// ---- Products ----

/// Creates a new product in a category, performing input validation.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    category_id: i64,
    price: f64,
    description: String,
) -> Result<product::Model> {
    let name = validate_name(&name)?.to_string();
    validate_price(price)?;

    Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    product::ActiveModel {
        name: Set(name),
        category_id: Set(category_id),
        price: Set(price),
        description: Set(description),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Updates an existing product's name, category, price, and description.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: String,
    category_id: i64,
    price: f64,
    description: String,
) -> Result<product::Model> {
    let name = validate_name(&name)?.to_string();
    validate_price(price)?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "category",
            id: category_id.to_string(),
        })?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(name);
    active.category_id = Set(category_id);
    active.price = Set(price);
    active.description = Set(description);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a product. Any stock ledger row for it is left behind, orphaned.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: product_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}

/// Retrieves a product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all products, newest first.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

// ---- Suppliers ----

/// Creates a new supplier.
pub async fn create_supplier(
    db: &DatabaseConnection,
    name: String,
    phone: String,
    email: String,
    address: String,
) -> Result<supplier::Model> {
    let name = validate_name(&name)?.to_string();

    supplier::ActiveModel {
        name: Set(name),
        phone: Set(phone),
        email: Set(email),
        address: Set(address),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Updates an existing supplier's contact details.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
    name: String,
    phone: String,
    email: String,
    address: String,
) -> Result<supplier::Model> {
    let name = validate_name(&name)?.to_string();

    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    let mut active: supplier::ActiveModel = existing.into();
    active.name = Set(name);
    active.phone = Set(phone);
    active.email = Set(email);
    active.address = Set(address);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a supplier.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<()> {
    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}

/// Retrieves a supplier by its unique ID.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all suppliers, newest first.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_desc(supplier::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
