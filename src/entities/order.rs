//! Order entity - Records an outgoing stock event at the point of sale.
//!
//! An order owns its line items exclusively; the items are fixed at creation.
//! Stock is debited when the order is created, not when it is accepted, so
//! the `pending -> completed` transition has no stock effect. At most one
//! pending order may exist per table at a time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order: `Pending` until accepted, then `Completed`.
/// `Completed` is terminal; there is no cancellation path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OrderStatus {
    /// Placed at checkout, stock already debited
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted and settled
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Table or counter identifier the order was placed for (e.g., "T1")
    pub table_no: String,
    /// Kind of order (e.g., "dine-in", "takeaway")
    pub order_type: String,
    /// Discount applied to the order in dollars
    pub discount: f64,
    /// Total charged after discount in dollars
    pub grand_total: f64,
    /// Amount the customer has paid in dollars
    pub paid_amount: f64,
    /// Lifecycle status, `Pending` until accepted
    pub status: OrderStatus,
    /// Opaque ID of the user who took the order
    pub created_by: String,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
