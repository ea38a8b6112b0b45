//! Reporting business logic - read-only aggregates over purchase and order
//! history plus the stock ledger.
//!
//! These functions never mutate anything. Missing or empty aggregates read as
//! zero, and a malformed row contributes nothing (logged, skipped) instead of
//! failing the whole report.

use crate::{
    core::purchase::purchase_total,
    entities::{
        Order, OrderStatus, Product, Purchase, PurchaseItem, StockLevel, order, stock_level,
    },
    errors::Result,
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Products with fewer units on hand than this show up in the low-stock list.
pub const LOW_STOCK_THRESHOLD: i32 = 8;

/// Headline totals for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSummary {
    /// Total value of all purchase lines
    pub purchase_total: f64,
    /// Total value of completed orders
    pub sales_total: f64,
    /// `sales_total - purchase_total`
    pub profit: f64,
}

/// Purchase and sales value for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    /// Month number, 1-12
    pub month: u32,
    /// Value purchased in this month
    pub purchase_total: f64,
    /// Value of completed orders in this month
    pub sales_total: f64,
}

/// Purchase and sales value for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    /// The day
    pub date: NaiveDate,
    /// Value purchased on this day
    pub purchase_total: f64,
    /// Value of completed orders on this day
    pub sales_total: f64,
}

/// One row of the low-stock listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockItem {
    /// Product the ledger row tracks
    pub product_id: i64,
    /// Product name, `None` for orphaned ledger rows whose product was deleted
    pub product_name: Option<String>,
    /// Units currently on hand
    pub quantity: i32,
}

/// Sales contribution of an order, or `None` when the stored grand total is
/// not a usable number.
fn order_sales_amount(placed: &order::Model) -> Option<f64> {
    if placed.grand_total.is_finite() {
        Some(placed.grand_total)
    } else {
        warn!(order_id = placed.id, "skipping order with malformed grand total");
        None
    }
}

/// Total value of every purchase line ever recorded. Malformed lines are
/// skipped and logged inside [`purchase_total`].
pub async fn total_purchase_value(db: &DatabaseConnection) -> Result<f64> {
    let items = PurchaseItem::find().all(db).await?;
    Ok(purchase_total(&items))
}

/// Total grand-total value of completed orders. Pending orders do not count
/// as sales.
pub async fn total_sales_value(db: &DatabaseConnection) -> Result<f64> {
    let completed = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Completed))
        .all(db)
        .await?;
    Ok(completed.iter().filter_map(order_sales_amount).sum())
}

/// Headline dashboard totals: purchases, sales, and their difference.
pub async fn profit_summary(db: &DatabaseConnection) -> Result<ProfitSummary> {
    let purchase_total = total_purchase_value(db).await?;
    let sales_total = total_sales_value(db).await?;
    Ok(ProfitSummary {
        purchase_total,
        sales_total,
        profit: sales_total - purchase_total,
    })
}

/// Twelve monthly buckets of purchase and completed-sales value for one year.
/// Months with no activity stay at zero.
pub async fn monthly_breakdown(db: &DatabaseConnection, year: i32) -> Result<Vec<MonthlyPoint>> {
    let mut points: Vec<MonthlyPoint> = (1..=12)
        .map(|month| MonthlyPoint {
            month,
            purchase_total: 0.0,
            sales_total: 0.0,
        })
        .collect();

    let purchases = Purchase::find()
        .find_with_related(PurchaseItem)
        .all(db)
        .await?;
    for (bought, items) in &purchases {
        let date = bought.purchase_date.date_naive();
        if date.year() == year {
            points[date.month0() as usize].purchase_total += purchase_total(items);
        }
    }

    let completed = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Completed))
        .all(db)
        .await?;
    for placed in &completed {
        let date = placed.created_at.date_naive();
        if date.year() == year {
            if let Some(amount) = order_sales_amount(placed) {
                points[date.month0() as usize].sales_total += amount;
            }
        }
    }

    Ok(points)
}

/// Per-day purchase and completed-sales value over an inclusive date range.
/// Only days with activity appear, in chronological order.
pub async fn daily_breakdown(
    db: &DatabaseConnection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DailyPoint>> {
    let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    let purchases = Purchase::find()
        .find_with_related(PurchaseItem)
        .all(db)
        .await?;
    for (bought, items) in &purchases {
        let date = bought.purchase_date.date_naive();
        if date >= from && date <= to {
            buckets.entry(date).or_insert((0.0, 0.0)).0 += purchase_total(items);
        }
    }

    let completed = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Completed))
        .all(db)
        .await?;
    for placed in &completed {
        let date = placed.created_at.date_naive();
        if date >= from && date <= to {
            if let Some(amount) = order_sales_amount(placed) {
                buckets.entry(date).or_insert((0.0, 0.0)).1 += amount;
            }
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(date, (purchase_total, sales_total))| DailyPoint {
            date,
            purchase_total,
            sales_total,
        })
        .collect())
}

/// Ledger rows below [`LOW_STOCK_THRESHOLD`], lowest quantity first. Rows
/// whose product has been deleted are still listed, without a name.
pub async fn low_stock(db: &DatabaseConnection) -> Result<Vec<LowStockItem>> {
    let rows = StockLevel::find()
        .filter(stock_level::Column::Quantity.lt(LOW_STOCK_THRESHOLD))
        .order_by_asc(stock_level::Column::Quantity)
        .all(db)
        .await?;

    let names: HashMap<i64, String> = Product::find()
        .all(db)
        .await?
        .into_iter()
        .map(|product| (product.id, product.name))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| LowStockItem {
            product_id: row.product_id,
            product_name: names.get(&row.product_id).cloned(),
            quantity: row.quantity,
        })
        .collect())
}
