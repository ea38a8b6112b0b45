//! Order business logic - the stock-out side of inventory reconciliation.
//!
//! An order is placed at checkout and debits the stock ledger immediately;
//! accepting it later only flips the status to completed. Placement is
//! all-or-nothing: a duplicate pending order for the table or a line that
//! exceeds on-hand stock rolls the entire transaction back, leaving no order
//! row, no items, and the ledger untouched.

use crate::{
    core::stock,
    entities::{Order, OrderItem, OrderStatus, Product, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// One submitted order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineInput {
    /// Product being sold
    pub product_id: i64,
    /// Units sold
    pub quantity: i32,
    /// Price per unit in dollars at the time of sale
    pub unit_price: f64,
}

fn validate_amount(label: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Validation {
            message: format!("{label} must be a non-negative number, got {amount}"),
        });
    }
    Ok(())
}

fn validate_line(line: &OrderLineInput) -> Result<()> {
    if line.quantity < 1 {
        return Err(Error::Validation {
            message: format!("Quantity must be at least 1, got {}", line.quantity),
        });
    }
    validate_amount("Unit price", line.unit_price)
}

/// Places a new order for a table and debits the stock ledger for every line.
///
/// Fails with [`Error::Conflict`] if the table already has a pending order,
/// and with [`Error::InsufficientStock`] if any line asks for more units than
/// are on hand. Either failure rolls back the whole transaction: no order
/// row, no items, no ledger change. The conflict check and the insert share
/// one transaction, so a concurrent create for the same table cannot slip
/// between them.
#[allow(clippy::too_many_arguments)]
pub async fn create_order(
    db: &DatabaseConnection,
    table_no: String,
    order_type: String,
    discount: f64,
    grand_total: f64,
    paid_amount: f64,
    created_by: String,
    lines: Vec<OrderLineInput>,
) -> Result<order::Model> {
    if table_no.trim().is_empty() {
        return Err(Error::Validation {
            message: "Table identifier cannot be empty".to_string(),
        });
    }
    validate_amount("Discount", discount)?;
    validate_amount("Grand total", grand_total)?;
    validate_amount("Paid amount", paid_amount)?;
    for line in &lines {
        validate_line(line)?;
    }

    let table_no = table_no.trim().to_string();
    let txn = db.begin().await?;

    let pending = Order::find()
        .filter(order::Column::TableNo.eq(table_no.as_str()))
        .filter(order::Column::Status.eq(OrderStatus::Pending))
        .one(&txn)
        .await?;
    if pending.is_some() {
        return Err(Error::Conflict {
            message: format!("A pending order already exists for table {table_no}"),
        });
    }

    let placed = order::ActiveModel {
        table_no: Set(table_no),
        order_type: Set(order_type),
        discount: Set(discount),
        grand_total: Set(grand_total),
        paid_amount: Set(paid_amount),
        status: Set(OrderStatus::Pending),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for line in &lines {
        let product = Product::find_by_id(line.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "product",
                id: line.product_id.to_string(),
            })?;

        let on_hand = stock::get_or_create_stock(&txn, line.product_id).await?;
        if on_hand.quantity < line.quantity {
            // Returning drops the transaction, rolling back the order row
            // and any lines already written
            return Err(Error::InsufficientStock {
                product: product.name,
                requested: line.quantity,
                available: on_hand.quantity,
            });
        }

        order_item::ActiveModel {
            order_id: Set(placed.id),
            product_name: Set(product.name),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            amount: Set(f64::from(line.quantity) * line.unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        stock::adjust_stock(&txn, line.product_id, -line.quantity).await?;
    }

    txn.commit().await?;
    Ok(placed)
}

/// Accepts a pending order, flipping its status to `Completed`.
///
/// Fails with [`Error::NotFound`] unless a pending order with this id exists;
/// completed orders cannot be accepted twice. The stock debit happened at
/// placement, so accepting has no ledger effect.
pub async fn accept_order(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    let pending = Order::find_by_id(order_id)
        .filter(order::Column::Status.eq(OrderStatus::Pending))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "pending order",
            id: order_id.to_string(),
        })?;

    let mut active: order::ActiveModel = pending.into();
    active.status = Set(OrderStatus::Completed);
    active.update(db).await.map_err(Into::into)
}

/// Retrieves an order together with its line items.
pub async fn get_order_with_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<(order::Model, Vec<order_item::Model>)> {
    let placed = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await?;
    Ok((placed, items))
}

/// Lists all orders, newest first.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
