//! Stock level entity - The stock ledger's current on-hand quantity per product.
//!
//! One row per product, created lazily on the first stock-affecting event.
//! This table is a mutable projection over purchase/order history and is the
//! single source of truth for how many units can be sold. It deliberately
//! carries no foreign key: deleting a product orphans its stock row rather
//! than cascading into the ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock level database model - one row per product
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_levels")]
pub struct Model {
    /// Unique identifier for the stock row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this row tracks (one row per product)
    #[sea_orm(unique)]
    pub product_id: i64,
    /// Units currently on hand, never negative
    pub quantity: i32,
    /// When the quantity was last adjusted
    pub updated_at: DateTime,
}

/// `StockLevel` has no enforced relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
