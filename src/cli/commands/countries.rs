//! Country read and delete commands
//!
//! This module implements `list`, `show` and `delete`.

use super::{open_store, report_catalog_error, to_pretty_json, EXIT_CONFIG, EXIT_OK};
use crate::adapters::database::{CountryFilter, CountrySort};
use crate::core::catalog::CountryCatalog;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only countries in this region (case-insensitive)
    #[arg(long)]
    pub region: Option<String>,

    /// Only countries using this currency code (case-insensitive)
    #[arg(long)]
    pub currency: Option<String>,

    /// Sort order: gdp_desc, gdp_asc, name_asc, name_desc, population_asc, population_desc
    #[arg(long)]
    pub sort: Option<String>,
}

impl ListArgs {
    /// Build the store filter from the arguments
    pub fn filter(&self) -> Result<CountryFilter, String> {
        let sort = match &self.sort {
            Some(s) => s.parse::<CountrySort>()?,
            None => CountrySort::default(),
        };

        Ok(CountryFilter {
            region: self.region.clone(),
            currency: self.currency.clone(),
            sort,
        })
    }

    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let filter = match self.filter() {
            Ok(f) => f,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let (_, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match CountryCatalog::new(store).list(&filter).await {
            Ok(countries) => {
                println!("{}", to_pretty_json(&countries)?);
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_catalog_error(&e)),
        }
    }
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Country name (case-insensitive)
    pub name: String,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match CountryCatalog::new(store).get(&self.name).await {
            Ok(country) => {
                println!("{}", to_pretty_json(&country)?);
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_catalog_error(&e)),
        }
    }
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Country name (case-insensitive)
    pub name: String,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, store) = match open_store(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match CountryCatalog::new(store).delete(&self.name).await {
            Ok(()) => {
                println!("✅ Country deleted: {}", self.name);
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_catalog_error(&e)),
        }
    }
}
