//! Authorization business logic - typed capabilities granted to roles.
//!
//! The view layer checks one capability per screen with [`has_capability`]
//! before invoking core operations; the core itself never reads ambient
//! session state. Capabilities are a closed enum with stable string forms so
//! grants survive in the database without dynamic permission strings.

use crate::{
    entities::{Role, RoleCapability, role, role_capability},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::warn;

/// Things a role can be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Maintain categories, products, and suppliers
    ManageCatalog,
    /// Record, update, and delete purchases
    ManagePurchases,
    /// Place and accept orders
    ManageOrders,
    /// View dashboard totals, series, and low-stock listings
    ViewReports,
    /// Create roles and change their grants
    ManageRoles,
    /// Change system and company settings
    ManageSettings,
}

impl Capability {
    /// Every capability, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::ManageCatalog,
        Self::ManagePurchases,
        Self::ManageOrders,
        Self::ViewReports,
        Self::ManageRoles,
        Self::ManageSettings,
    ];

    /// Stable string form stored in the `role_capabilities` table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageCatalog => "manage_catalog",
            Self::ManagePurchases => "manage_purchases",
            Self::ManageOrders => "manage_orders",
            Self::ViewReports => "view_reports",
            Self::ManageRoles => "manage_roles",
            Self::ManageSettings => "manage_settings",
        }
    }

    /// Parses the stored string form; `None` for unknown strings.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cap| cap.as_str() == value)
    }
}

async fn insert_grants<C>(db: &C, role_id: i64, capabilities: &[Capability]) -> Result<()>
where
    C: ConnectionTrait,
{
    // Canonical order also deduplicates repeated grants in the input
    for cap in Capability::ALL.into_iter().filter(|cap| capabilities.contains(cap)) {
        role_capability::ActiveModel {
            role_id: Set(role_id),
            capability: Set(cap.as_str().to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Creates a role with an initial set of capability grants.
pub async fn create_role(
    db: &DatabaseConnection,
    name: String,
    capabilities: &[Capability],
) -> Result<role::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Role name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    if Role::find()
        .filter(role::Column::Name.eq(name.as_str()))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(Error::Conflict {
            message: format!("Role {name} already exists"),
        });
    }

    let created = role::ActiveModel {
        name: Set(name),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    insert_grants(&txn, created.id, capabilities).await?;

    txn.commit().await?;
    Ok(created)
}

/// Replaces a role's grants wholesale with the given set.
pub async fn set_role_capabilities(
    db: &DatabaseConnection,
    role_id: i64,
    capabilities: &[Capability],
) -> Result<()> {
    let txn = db.begin().await?;

    Role::find_by_id(role_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "role",
            id: role_id.to_string(),
        })?;

    RoleCapability::delete_many()
        .filter(role_capability::Column::RoleId.eq(role_id))
        .exec(&txn)
        .await?;
    insert_grants(&txn, role_id, capabilities).await?;

    txn.commit().await?;
    Ok(())
}

/// Lists a role's capabilities. Grants whose stored string no longer parses
/// are skipped and logged.
pub async fn role_capabilities(
    db: &DatabaseConnection,
    role_id: i64,
) -> Result<Vec<Capability>> {
    let grants = RoleCapability::find()
        .filter(role_capability::Column::RoleId.eq(role_id))
        .all(db)
        .await?;

    Ok(grants
        .iter()
        .filter_map(|grant| {
            let cap = Capability::parse(&grant.capability);
            if cap.is_none() {
                warn!(
                    role_id,
                    capability = %grant.capability,
                    "skipping unknown capability grant"
                );
            }
            cap
        })
        .collect())
}

/// The single authorization question: does this role hold this capability?
pub async fn has_capability(
    db: &DatabaseConnection,
    role_id: i64,
    capability: Capability,
) -> Result<bool> {
    let grant = RoleCapability::find()
        .filter(role_capability::Column::RoleId.eq(role_id))
        .filter(role_capability::Column::Capability.eq(capability.as_str()))
        .one(db)
        .await?;
    Ok(grant.is_some())
}

/// Finds a role by its unique name.
pub async fn get_role_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<role::Model>> {
    Role::find()
        .filter(role::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all roles, alphabetically.
pub async fn list_roles(db: &DatabaseConnection) -> Result<Vec<role::Model>> {
    Role::find()
        .order_by_asc(role::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a role; its grants go with it.
pub async fn delete_role(db: &DatabaseConnection, role_id: i64) -> Result<()> {
    let existing = Role::find_by_id(role_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "role",
            id: role_id.to_string(),
        })?;

    let txn = db.begin().await?;
    RoleCapability::delete_many()
        .filter(role_capability::Column::RoleId.eq(role_id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;
    txn.commit().await?;
    Ok(())
}
