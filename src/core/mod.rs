//! Core business logic - framework-agnostic catalog, inventory, purchasing,
//! ordering, reporting, authorization, and settings operations.
//!
//! Every operation takes an explicit database connection and, where relevant,
//! an explicit actor id; nothing reads ambient request or session state.

/// Role-based authorization with typed capabilities
pub mod authz;
/// Category, product, and supplier reference data
pub mod catalog;
/// Order (stock-out) lifecycle
pub mod order;
/// Purchase (stock-in) lifecycle
pub mod purchase;
/// Read-only reporting aggregates
pub mod report;
/// Key-value system and company settings
pub mod settings;
/// The stock ledger of on-hand quantities
pub mod stock;
