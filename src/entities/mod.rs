//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod order;
pub mod order_item;
pub mod product;
pub mod purchase;
pub mod purchase_item;
pub mod role;
pub mod role_capability;
pub mod setting;
pub mod stock_level;
pub mod supplier;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use purchase::{
    Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel, PurchaseStatus,
};
pub use purchase_item::{
    Column as PurchaseItemColumn, Entity as PurchaseItem, Model as PurchaseItemModel,
};
pub use role::{Column as RoleColumn, Entity as Role, Model as RoleModel};
pub use role_capability::{
    Column as RoleCapabilityColumn, Entity as RoleCapability, Model as RoleCapabilityModel,
};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use stock_level::{
    Column as StockLevelColumn, Entity as StockLevel, Model as StockLevelModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
