/// Database configuration and connection management
pub mod database;

/// Company profile and default role seeding from config.toml
pub mod company;
