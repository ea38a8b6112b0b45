//! Purchase business logic - the stock-in side of inventory reconciliation.
//!
//! A purchase records goods bought from a supplier and owns its line items.
//! The stock ledger is credited only while a purchase is `Received`:
//! creating a received purchase credits each line, updating one first
//! reverses the old lines (if they had been received) and then credits the
//! new mix (if the new status is received), and deleting one reverses its
//! lines unconditionally - update reverses only received purchases, delete
//! reverses regardless of status. Each of these flows runs in a single
//! database transaction so rows and ledger adjustments commit together.

use crate::{
    core::stock,
    entities::{
        Product, Purchase, PurchaseItem, PurchaseStatus, purchase, purchase_item,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::warn;

/// One submitted purchase line, as entered on the purchase form.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLineInput {
    /// Product being bought
    pub product_id: i64,
    /// Units bought
    pub quantity: i32,
    /// Cost per unit in dollars
    pub unit_price: f64,
}

fn validate_unit_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            message: format!("Unit price must be a non-negative number, got {price}"),
        });
    }
    Ok(())
}

fn validate_line(line: &PurchaseLineInput) -> Result<()> {
    if line.quantity < 1 {
        return Err(Error::Validation {
            message: format!("Quantity must be at least 1, got {}", line.quantity),
        });
    }
    validate_unit_price(line.unit_price)
}

/// Merges duplicate-product lines by summing their quantities. Submission
/// order is preserved and the first submitted unit price per product wins;
/// later differing prices for the same product are discarded.
fn coalesce_lines(lines: Vec<PurchaseLineInput>) -> Vec<PurchaseLineInput> {
    let mut coalesced: Vec<PurchaseLineInput> = Vec::new();
    for line in lines {
        match coalesced
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => coalesced.push(line),
        }
    }
    coalesced
}

async fn insert_item<C>(
    db: &C,
    purchase_id: i64,
    line: &PurchaseLineInput,
) -> Result<purchase_item::Model>
where
    C: ConnectionTrait,
{
    // The product must still exist; a dangling reference aborts the whole
    // transaction as NotFound.
    Product::find_by_id(line.product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "product",
            id: line.product_id.to_string(),
        })?;

    purchase_item::ActiveModel {
        purchase_id: Set(purchase_id),
        product_id: Set(line.product_id),
        quantity: Set(line.quantity),
        unit_price: Set(line.unit_price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Records a new purchase and, if its status is `Received`, credits the stock
/// ledger for every resulting line.
///
/// Duplicate-product lines are coalesced (see [`coalesce_lines`]). All lines
/// are validated before anything is written; the purchase row, its items, and
/// the ledger credits then commit in one transaction.
pub async fn create_purchase(
    db: &DatabaseConnection,
    supplier_id: i64,
    status: PurchaseStatus,
    created_by: String,
    lines: Vec<PurchaseLineInput>,
) -> Result<purchase::Model> {
    for line in &lines {
        validate_line(line)?;
    }

    let txn = db.begin().await?;

    crate::entities::Supplier::find_by_id(supplier_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    let purchase = purchase::ActiveModel {
        supplier_id: Set(supplier_id),
        status: Set(status),
        created_by: Set(created_by),
        purchase_date: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for line in coalesce_lines(lines) {
        insert_item(&txn, purchase.id, &line).await?;
        if status == PurchaseStatus::Received {
            stock::adjust_stock(&txn, line.product_id, line.quantity).await?;
        }
    }

    txn.commit().await?;
    Ok(purchase)
}

/// Replaces a purchase's supplier, status, and entire line set.
///
/// If the purchase was previously `Received`, every existing line is first
/// reversed out of the ledger. The old lines are then discarded and the
/// submitted rows inserted verbatim - no coalescing on update, and rows with
/// quantity <= 0 are dropped. If the new status is `Received`, every new line
/// is credited. Net effect: Pending -> Received credits, Received -> Received
/// re-credits the new mix, Received -> Pending debits without re-crediting.
pub async fn update_purchase(
    db: &DatabaseConnection,
    purchase_id: i64,
    supplier_id: i64,
    status: PurchaseStatus,
    created_by: String,
    lines: Vec<PurchaseLineInput>,
) -> Result<purchase::Model> {
    for line in &lines {
        validate_unit_price(line.unit_price)?;
    }
    let lines: Vec<PurchaseLineInput> =
        lines.into_iter().filter(|line| line.quantity > 0).collect();

    let txn = db.begin().await?;

    let purchase = Purchase::find_by_id(purchase_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "purchase",
            id: purchase_id.to_string(),
        })?;

    crate::entities::Supplier::find_by_id(supplier_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "supplier",
            id: supplier_id.to_string(),
        })?;

    let existing_items = PurchaseItem::find()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .all(&txn)
        .await?;

    if purchase.status == PurchaseStatus::Received {
        for item in &existing_items {
            stock::adjust_stock(&txn, item.product_id, -item.quantity).await?;
        }
    }

    PurchaseItem::delete_many()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .exec(&txn)
        .await?;

    let mut active: purchase::ActiveModel = purchase.into();
    active.supplier_id = Set(supplier_id);
    active.status = Set(status);
    active.created_by = Set(created_by);
    let purchase = active.update(&txn).await?;

    for line in &lines {
        insert_item(&txn, purchase.id, line).await?;
        if status == PurchaseStatus::Received {
            stock::adjust_stock(&txn, line.product_id, line.quantity).await?;
        }
    }

    txn.commit().await?;
    Ok(purchase)
}

/// Deletes a purchase and its lines, reversing every line out of the ledger
/// regardless of the purchase's status. Reversals of never-received lines
/// clamp at zero in the ledger.
pub async fn delete_purchase(db: &DatabaseConnection, purchase_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let purchase = Purchase::find_by_id(purchase_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "purchase",
            id: purchase_id.to_string(),
        })?;

    let items = PurchaseItem::find()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .all(&txn)
        .await?;

    for item in &items {
        stock::adjust_stock(&txn, item.product_id, -item.quantity).await?;
    }

    PurchaseItem::delete_many()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .exec(&txn)
        .await?;
    purchase.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Line total, or `None` when the row is malformed (quantity < 1 or a
/// negative/non-finite unit price).
fn item_total(item: &purchase_item::Model) -> Option<f64> {
    if item.quantity < 1 || !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return None;
    }
    Some(f64::from(item.quantity) * item.unit_price)
}

/// Sums line totals for a purchase. A malformed line is skipped and logged so
/// one bad row cannot fail an aggregate listing; totals are recomputed on
/// demand, never cached.
pub fn purchase_total(items: &[purchase_item::Model]) -> f64 {
    items
        .iter()
        .filter_map(|item| {
            let total = item_total(item);
            if total.is_none() {
                warn!(
                    item_id = item.id,
                    purchase_id = item.purchase_id,
                    quantity = item.quantity,
                    unit_price = item.unit_price,
                    "skipping malformed purchase line in total"
                );
            }
            total
        })
        .sum()
}

/// Fetches a purchase's lines and computes its total.
pub async fn purchase_total_by_id(db: &DatabaseConnection, purchase_id: i64) -> Result<f64> {
    Purchase::find_by_id(purchase_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "purchase",
            id: purchase_id.to_string(),
        })?;

    let items = PurchaseItem::find()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .all(db)
        .await?;
    Ok(purchase_total(&items))
}

/// Retrieves a purchase together with its line items.
pub async fn get_purchase_with_items(
    db: &DatabaseConnection,
    purchase_id: i64,
) -> Result<(purchase::Model, Vec<purchase_item::Model>)> {
    let purchase = Purchase::find_by_id(purchase_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "purchase",
            id: purchase_id.to_string(),
        })?;

    let items = PurchaseItem::find()
        .filter(purchase_item::Column::PurchaseId.eq(purchase_id))
        .all(db)
        .await?;
    Ok((purchase, items))
}

/// Lists all purchases, newest first.
pub async fn list_purchases(db: &DatabaseConnection) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .order_by_desc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::stock::stock_on_hand;
    use crate::test_utils::{
        create_test_product, create_test_supplier, purchase_line, setup_with_product,
    };

    #[tokio::test]
    async fn test_create_received_credits_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        // Product P at stock 0, receive 10 units at 5 dollars
        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;

        assert_eq!(stock_on_hand(&db, product.id).await?, 10);
        assert_eq!(purchase_total_by_id(&db, purchase.id).await?, 50.0);
        assert_eq!(purchase.created_by, "test_user");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_pending_has_no_stock_effect() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;

        assert_eq!(stock_on_hand(&db, product.id).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_coalesces_duplicate_products() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let other = create_test_product(&db, "Other", product.category_id).await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        // Two rows for the same product plus one distinct row; the first
        // submitted price for the duplicate wins.
        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![
                purchase_line(product.id, 3, 2.0),
                purchase_line(other.id, 1, 9.0),
                purchase_line(product.id, 4, 99.0),
            ],
        )
        .await?;

        let (_, items) = get_purchase_with_items(&db, purchase.id).await?;
        assert_eq!(items.len(), 2);

        let merged = items.iter().find(|i| i.product_id == product.id).unwrap();
        assert_eq!(merged.quantity, 7);
        assert_eq!(merged.unit_price, 2.0);

        assert_eq!(stock_on_hand(&db, product.id).await?, 7);
        assert_eq!(stock_on_hand(&db, other.id).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_validates_before_mutation() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let result = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![
                purchase_line(product.id, 5, 1.0),
                purchase_line(product.id, 0, 1.0),
            ],
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 5, -1.0)],
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        // Nothing was persisted and no stock moved
        assert!(list_purchases(&db).await?.is_empty());
        assert_eq!(stock_on_hand(&db, product.id).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_unknown_supplier_fails() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let result = create_purchase(
            &db,
            999,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 1, 1.0)],
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::NotFound { entity: "supplier", .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_received_to_pending_debits_old_lines_only() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;
        assert_eq!(stock_on_hand(&db, product.id).await?, 10);

        // Received -> Pending reverses the old quantities and applies no
        // credit for the new lines
        update_purchase(
            &db,
            purchase.id,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 6, 5.0)],
        )
        .await?;

        assert_eq!(stock_on_hand(&db, product.id).await?, 0);

        let (updated, items) = get_purchase_with_items(&db, purchase.id).await?;
        assert_eq!(updated.status, PurchaseStatus::Pending);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_received_to_received_recredits_new_mix() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let other = create_test_product(&db, "Other", product.category_id).await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;

        update_purchase(
            &db,
            purchase.id,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(other.id, 3, 4.0)],
        )
        .await?;

        // Old product reversed, new mix credited
        assert_eq!(stock_on_hand(&db, product.id).await?, 0);
        assert_eq!(stock_on_hand(&db, other.id).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_pending_to_received_credits_without_reversal() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;
        assert_eq!(stock_on_hand(&db, product.id).await?, 0);

        update_purchase(
            &db,
            purchase.id,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;

        assert_eq!(stock_on_hand(&db, product.id).await?, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_does_not_coalesce_and_drops_nonpositive_rows() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 1, 5.0)],
        )
        .await?;

        // Same product twice stays two rows; the zero-quantity row is dropped
        update_purchase(
            &db,
            purchase.id,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![
                purchase_line(product.id, 2, 5.0),
                purchase_line(product.id, 3, 6.0),
                purchase_line(product.id, 0, 7.0),
            ],
        )
        .await?;

        let (_, items) = get_purchase_with_items(&db, purchase.id).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_received_purchase_reverses_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;
        assert_eq!(stock_on_hand(&db, product.id).await?, 10);

        delete_purchase(&db, purchase.id).await?;

        assert_eq!(stock_on_hand(&db, product.id).await?, 0);
        assert!(Purchase::find_by_id(purchase.id).one(&db).await?.is_none());
        let leftover = PurchaseItem::find()
            .filter(purchase_item::Column::PurchaseId.eq(purchase.id))
            .all(&db)
            .await?;
        assert!(leftover.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_pending_purchase_still_reverses_stock() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        // Seed the ledger from an unrelated received purchase
        create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Received,
            "test_user".to_string(),
            vec![purchase_line(product.id, 10, 5.0)],
        )
        .await?;

        let pending = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 4, 5.0)],
        )
        .await?;
        assert_eq!(stock_on_hand(&db, product.id).await?, 10);

        // Delete reverses unconditionally, even though the pending purchase
        // never credited stock
        delete_purchase(&db, pending.id).await?;
        assert_eq!(stock_on_hand(&db, product.id).await?, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_total_skips_malformed_line() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let purchase = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 2, 10.0)],
        )
        .await?;

        // Corrupt rows written around the validated path
        purchase_item::ActiveModel {
            purchase_id: Set(purchase.id),
            product_id: Set(product.id),
            quantity: Set(-3),
            unit_price: Set(10.0),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        purchase_item::ActiveModel {
            purchase_id: Set(purchase.id),
            product_id: Set(product.id),
            quantity: Set(1),
            unit_price: Set(-2.5),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The two malformed rows are skipped, not propagated
        assert_eq!(purchase_total_by_id(&db, purchase.id).await?, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_purchase_is_not_found() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let result = update_purchase(
            &db,
            999,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 1, 1.0)],
        )
        .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        let result = delete_purchase(&db, 999).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_purchases_newest_first() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let supplier = create_test_supplier(&db, "Acme Foods").await?;

        let first = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 1, 1.0)],
        )
        .await?;
        let second = create_purchase(
            &db,
            supplier.id,
            PurchaseStatus::Pending,
            "test_user".to_string(),
            vec![purchase_line(product.id, 2, 1.0)],
        )
        .await?;

        let listed = list_purchases(&db).await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        Ok(())
    }
}
