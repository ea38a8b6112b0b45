//! Settings business logic - key-value system and company settings.
//!
//! Backed by the `settings` table. The company profile the view layer shows
//! on receipts and headers lives under the well-known keys below; the binary
//! seeds them from config.toml on first run.

use crate::{
    config::company::CompanyConfig,
    entities::{Setting, setting},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Display name of the business
pub const COMPANY_NAME_KEY: &str = "company_name";
/// Postal address shown on receipts
pub const COMPANY_ADDRESS_KEY: &str = "company_address";
/// Contact phone number
pub const COMPANY_PHONE_KEY: &str = "company_phone";
/// Currency symbol used when formatting amounts
pub const CURRENCY_SYMBOL_KEY: &str = "currency_symbol";

/// Reads a setting's value, `None` if the key has never been set.
pub async fn get_setting(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let found = Setting::find()
        .filter(setting::Column::Key.eq(key))
        .one(db)
        .await?;
    Ok(found.map(|s| s.value))
}

/// Writes a setting, inserting or updating as needed.
pub async fn set_setting<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().naive_utc();

    let existing = Setting::find()
        .filter(setting::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(found) = existing {
        let mut active: setting::ActiveModel = found.into();
        active.value = Set(value);
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Seeds the company profile settings from config.toml values, leaving keys
/// that were already set alone.
pub async fn seed_company_settings(
    db: &DatabaseConnection,
    company: &CompanyConfig,
) -> Result<()> {
    let defaults = [
        (COMPANY_NAME_KEY, company.name.clone()),
        (COMPANY_ADDRESS_KEY, company.address.clone()),
        (COMPANY_PHONE_KEY, company.phone.clone()),
        (CURRENCY_SYMBOL_KEY, company.currency.clone()),
    ];

    for (key, value) in defaults {
        if get_setting(db, key).await?.is_none() {
            set_setting(db, key, value).await?;
        }
    }

    Ok(())
}
