//! Administration bootstrap for `Stockroom`.
//!
//! Prepares a deployment: initializes logging, loads configuration, creates
//! the database schema, and seeds the company profile and default roles. The
//! web view layer runs as a separate process against the same database.

use dotenvy::dotenv;
use stockroom::core::{authz, settings};
use stockroom::errors::Result;
use stockroom::{config, core::authz::Capability};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the company configuration
    let app_config = config::company::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;
    info!("Loaded configuration for {}.", app_config.company.name);

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema is in place."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed company settings and default roles (idempotent)
    settings::seed_company_settings(&db, &app_config.company).await?;

    for role_config in &app_config.roles {
        if authz::get_role_by_name(&db, &role_config.name).await?.is_some() {
            continue;
        }
        let capabilities: Vec<Capability> = role_config
            .capabilities
            .iter()
            .filter_map(|value| {
                let cap = Capability::parse(value);
                if cap.is_none() {
                    warn!(
                        role = %role_config.name,
                        capability = %value,
                        "ignoring unknown capability in config.toml"
                    );
                }
                cap
            })
            .collect();
        authz::create_role(&db, role_config.name.clone(), &capabilities).await?;
        info!("Seeded role {}.", role_config.name);
    }

    info!("Stockroom database is ready.");
    Ok(())
}
