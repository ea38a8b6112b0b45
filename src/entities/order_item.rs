//! Order item entity - One line of an order, immutable after creation.
//!
//! The product name is a denormalized snapshot taken at checkout, so order
//! history stays readable even after the product is deleted from the catalog.
//! There is no product foreign key for the same reason.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning order
    pub order_id: i64,
    /// Product name snapshot taken when the order was placed
    pub product_name: String,
    /// Units sold on this line
    pub quantity: i32,
    /// Price per unit in dollars at the time of sale
    pub unit_price: f64,
    /// Line total, always `quantity * unit_price`
    pub amount: f64,
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
