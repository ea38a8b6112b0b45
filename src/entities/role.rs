//! Role entity - A named bundle of capabilities assignable to users.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Unique identifier for the role
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Role name (e.g., "manager", "cashier")
    #[sea_orm(unique)]
    pub name: String,
    /// When the role was created
    pub created_at: DateTime,
}

/// Defines relationships between Role and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One role is granted many capabilities
    #[sea_orm(has_many = "super::role_capability::Entity")]
    Capabilities,
}

impl Related<super::role_capability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Capabilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
