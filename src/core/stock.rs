//! Stock ledger business logic - the authoritative on-hand quantity per product.
//!
//! All quantity changes flow through [`adjust_stock`]; there is no direct
//! "set". Ledger rows are materialized lazily: asking about a product that has
//! never had a stock-affecting event creates its row at zero rather than
//! failing. Adjustments floor at zero - a deficit delta is capped, logged, and
//! applied, never rejected.

use crate::{
    entities::{StockLevel, stock_level},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::Expr};
use tracing::warn;

/// Returns the ledger row for a product, creating it at zero quantity if the
/// product has never been stocked. Generic over [`ConnectionTrait`] so it can
/// run inside an enclosing transaction.
pub async fn get_or_create_stock<C>(db: &C, product_id: i64) -> Result<stock_level::Model>
where
    C: ConnectionTrait,
{
    if let Some(stock) = StockLevel::find()
        .filter(stock_level::Column::ProductId.eq(product_id))
        .one(db)
        .await?
    {
        return Ok(stock);
    }

    let stock = stock_level::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(0),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    stock.insert(db).await.map_err(Into::into)
}

/// Returns the units currently on hand for a product. Unknown products read
/// as zero (and get their ledger row created).
pub async fn stock_on_hand<C>(db: &C, product_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    Ok(get_or_create_stock(db, product_id).await?.quantity)
}

/// Applies a delta to a product's on-hand quantity and returns the updated row.
///
/// The update is a single atomic SQL expression,
/// `quantity = MAX(0, quantity + delta)`, so concurrent adjustments cannot
/// lose updates and the result can never go negative. A delta that would have
/// taken the quantity below zero is capped at zero; the clamp is logged, not
/// rejected.
pub async fn adjust_stock<C>(db: &C, product_id: i64, delta: i32) -> Result<stock_level::Model>
where
    C: ConnectionTrait,
{
    let before = get_or_create_stock(db, product_id).await?;

    StockLevel::update_many()
        .col_expr(
            stock_level::Column::Quantity,
            Expr::cust_with_values("MAX(0, quantity + ?)", [delta]),
        )
        .col_expr(
            stock_level::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(stock_level::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    if i64::from(before.quantity) + i64::from(delta) < 0 {
        warn!(
            product_id,
            delta,
            on_hand = before.quantity,
            "deficit stock adjustment clamped at zero"
        );
    }

    StockLevel::find()
        .filter(stock_level::Column::ProductId.eq(product_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "stock level",
            id: product_id.to_string(),
        })
}
