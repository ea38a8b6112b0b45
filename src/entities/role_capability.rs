//! Role capability entity - One capability granted to a role.
//!
//! The `capability` column stores the stable string form of
//! [`crate::core::authz::Capability`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role capability database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role_capabilities")]
pub struct Model {
    /// Unique identifier for the grant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the role holding the grant
    pub role_id: i64,
    /// String form of the granted capability (e.g., `"manage_orders"`)
    pub capability: String,
}

/// Defines relationships between `RoleCapability` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each grant belongs to one role
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
