//! PostgreSQL row models
//!
//! This module maps rows of the `countries` table to the domain entity.

use crate::domain::{Country, CurrencyCode, NameKey, Result, StoreError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio_postgres::Row;

/// Column list shared by every `SELECT` on `countries`
pub const COUNTRY_COLUMNS: &str = "id, name, name_key, capital, region, population, \
     currency_code, exchange_rate, estimated_gdp, flag_url, last_refreshed_at, \
     created_at, updated_at";

/// Row of the `countries` table
#[derive(Debug, Clone)]
pub struct PostgreSQLCountry {
    pub id: i64,
    pub name: String,
    pub name_key: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostgreSQLCountry {
    /// Read a row selected with [`COUNTRY_COLUMNS`]
    pub fn from_row(row: &Row) -> Result<Self> {
        let decode = |e: tokio_postgres::Error| StoreError::Decode(e.to_string());

        Ok(Self {
            id: row.try_get("id").map_err(decode)?,
            name: row.try_get("name").map_err(decode)?,
            name_key: row.try_get("name_key").map_err(decode)?,
            capital: row.try_get("capital").map_err(decode)?,
            region: row.try_get("region").map_err(decode)?,
            population: row.try_get("population").map_err(decode)?,
            currency_code: row.try_get("currency_code").map_err(decode)?,
            exchange_rate: row.try_get("exchange_rate").map_err(decode)?,
            estimated_gdp: row.try_get("estimated_gdp").map_err(decode)?,
            flag_url: row.try_get("flag_url").map_err(decode)?,
            last_refreshed_at: row.try_get("last_refreshed_at").map_err(decode)?,
            created_at: row.try_get("created_at").map_err(decode)?,
            updated_at: row.try_get("updated_at").map_err(decode)?,
        })
    }

    /// Convert to the domain entity
    pub fn to_domain(self) -> Country {
        Country {
            id: self.id,
            name: self.name,
            name_key: NameKey::from_name(&self.name_key),
            capital: self.capital,
            region: self.region,
            population: self.population,
            currency_code: self.currency_code.map(CurrencyCode::new),
            exchange_rate: self.exchange_rate,
            estimated_gdp: self.estimated_gdp,
            flag_url: self.flag_url,
            last_refreshed_at: self.last_refreshed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
