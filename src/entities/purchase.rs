//! Purchase entity - Records an incoming stock event from a supplier.
//!
//! A purchase owns its line items exclusively. Its status decides whether the
//! lines have been credited to the stock ledger: only `Received` purchases
//! have a stock effect.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase.
///
/// Stock is credited while the purchase is `Received`; `Pending` and
/// `Ordered` purchases are bookkeeping only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PurchaseStatus {
    /// Goods have arrived and the lines are credited to stock
    #[sea_orm(string_value = "Received")]
    Received,
    /// Awaiting confirmation, no stock effect
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Placed with the supplier, no stock effect
    #[sea_orm(string_value = "Ordered")]
    Ordered,
}

/// Purchase database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the supplier the goods come from
    pub supplier_id: i64,
    /// Lifecycle status; governs the stock effect of the line items
    pub status: PurchaseStatus,
    /// Opaque ID of the user who recorded the purchase
    pub created_by: String,
    /// When the purchase was recorded
    pub purchase_date: DateTimeUtc,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_delete = "Cascade"
    )]
    Supplier,
    /// One purchase owns many line items
    #[sea_orm(has_many = "super::purchase_item::Entity")]
    Items,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::purchase_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
