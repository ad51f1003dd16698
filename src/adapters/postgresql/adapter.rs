//! PostgreSQL adapter implementing the store traits
//!
//! Transactions run on one pooled connection with explicit
//! `BEGIN`/`COMMIT`/`ROLLBACK`. A transaction dropped while still open detaches
//! its connection from the pool so the server aborts it on disconnect.

use crate::adapters::database::traits::{
    CountryFilter, CountrySort, CountryStore, CountryTransaction,
};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{PostgreSQLCountry, COUNTRY_COLUMNS};
use crate::domain::{Country, CountryFields, NameKey, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;

/// PostgreSQL implementation of [`CountryStore`]
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

/// `ORDER BY` clause for a listing
fn order_clause(sort: CountrySort) -> &'static str {
    match sort {
        CountrySort::Id => "id ASC",
        CountrySort::GdpDesc => "estimated_gdp DESC NULLS LAST, name ASC",
        CountrySort::GdpAsc => "estimated_gdp ASC NULLS LAST, name ASC",
        CountrySort::NameAsc => "name ASC",
        CountrySort::NameDesc => "name DESC",
        CountrySort::PopulationAsc => "population ASC, name ASC",
        CountrySort::PopulationDesc => "population DESC, name ASC",
    }
}

/// Build the listing query and its parameters
fn list_query(filter: &CountryFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(region) = &filter.region {
        params.push(region.clone());
        conditions.push(format!("LOWER(region) = LOWER(${})", params.len()));
    }
    if let Some(currency) = &filter.currency {
        params.push(currency.clone());
        conditions.push(format!("LOWER(currency_code) = LOWER(${})", params.len()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT {COUNTRY_COLUMNS} FROM countries{where_clause} ORDER BY {}",
        order_clause(filter.sort)
    );
    (query, params)
}

fn rows_to_countries(rows: &[tokio_postgres::Row]) -> Result<Vec<Country>> {
    rows.iter()
        .map(|row| PostgreSQLCountry::from_row(row).map(PostgreSQLCountry::to_domain))
        .collect()
}

#[async_trait]
impl CountryStore for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn begin(&self) -> Result<Box<dyn CountryTransaction>> {
        let conn = self.client.get_connection().await?;
        conn.batch_execute("BEGIN")
            .await
            .map_err(|e| StoreError::Transaction(format!("Failed to begin transaction: {e}")))?;

        tracing::debug!("PostgreSQL transaction opened");
        Ok(Box::new(PostgreSQLTransaction { conn: Some(conn) }))
    }

    async fn count(&self) -> Result<u64> {
        let rows = self
            .client
            .query("SELECT COUNT(*) AS total FROM countries", &[])
            .await?;
        let total: i64 = rows
            .first()
            .map(|row| row.try_get("total"))
            .transpose()
            .map_err(|e| StoreError::Decode(e.to_string()))?
            .unwrap_or(0);
        Ok(total.max(0) as u64)
    }

    async fn max_last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
        let rows = self
            .client
            .query(
                "SELECT MAX(last_refreshed_at) AS last_refreshed_at FROM countries",
                &[],
            )
            .await?;
        match rows.first() {
            Some(row) => row
                .try_get("last_refreshed_at")
                .map_err(|e| StoreError::Decode(e.to_string()).into()),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, key: &NameKey) -> Result<Option<Country>> {
        let query = format!("SELECT {COUNTRY_COLUMNS} FROM countries WHERE name_key = $1");
        let rows = self.client.query(&query, &[&key.as_str()]).await?;
        Ok(rows_to_countries(&rows)?.into_iter().next())
    }

    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let (query, params) = list_query(filter);
        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        tracing::debug!(query = %query, "Listing countries");
        let rows = self.client.query(&query, &params).await?;
        rows_to_countries(&rows)
    }

    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let query = format!(
            "SELECT {COUNTRY_COLUMNS} FROM countries ORDER BY {} LIMIT $1",
            order_clause(CountrySort::GdpDesc)
        );
        let limit = limit as i64;
        let rows = self.client.query(&query, &[&limit]).await?;
        rows_to_countries(&rows)
    }

    async fn delete_by_name(&self, key: &NameKey) -> Result<bool> {
        let deleted = self
            .client
            .execute("DELETE FROM countries WHERE name_key = $1", &[&key.as_str()])
            .await?;
        Ok(deleted > 0)
    }

    fn store_name(&self) -> &str {
        "postgresql"
    }
}

/// An open PostgreSQL transaction on a dedicated pooled connection
struct PostgreSQLTransaction {
    conn: Option<deadpool_postgres::Object>,
}

impl PostgreSQLTransaction {
    fn conn(&self) -> Result<&deadpool_postgres::Object> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::Transaction("transaction already finished".to_string()).into())
    }

    async fn finish(mut self: Box<Self>, statement: &str) -> Result<()> {
        let conn = self
            .conn
            .take()
            .ok_or_else(|| StoreError::Transaction("transaction already finished".to_string()))?;

        match conn.batch_execute(statement).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // Never hand a connection in an unknown transaction state back to the pool
                drop(deadpool_postgres::Object::take(conn));
                Err(StoreError::Transaction(format!("{statement} failed: {e}")).into())
            }
        }
    }
}

impl Drop for PostgreSQLTransaction {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            tracing::warn!("PostgreSQL transaction dropped while open; discarding connection");
            drop(deadpool_postgres::Object::take(conn));
        }
    }
}

#[async_trait]
impl CountryTransaction for PostgreSQLTransaction {
    async fn find_by_name(&mut self, key: &NameKey) -> Result<Option<Country>> {
        let query = format!("SELECT {COUNTRY_COLUMNS} FROM countries WHERE name_key = $1");
        let rows = self
            .conn()?
            .query(&query, &[&key.as_str()])
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Ok(rows_to_countries(&rows)?.into_iter().next())
    }

    async fn create(&mut self, name: &str, fields: &CountryFields) -> Result<Country> {
        let query = format!(
            r#"
            INSERT INTO countries (
                name, name_key, capital, region, population, currency_code,
                exchange_rate, estimated_gdp, flag_url, last_refreshed_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING {COUNTRY_COLUMNS}
            "#
        );
        let name_key = NameKey::from_name(name);
        let currency_code = fields.currency_code.as_ref().map(|c| c.as_str());

        let row = self
            .conn()?
            .query_one(
                &query,
                &[
                    &name,
                    &name_key.as_str(),
                    &fields.capital,
                    &fields.region,
                    &fields.population,
                    &currency_code,
                    &fields.exchange_rate,
                    &fields.estimated_gdp,
                    &fields.flag_url,
                    &fields.last_refreshed_at,
                ],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    StoreError::Conflict(format!("country '{name}' already exists"))
                } else {
                    StoreError::WriteFailed(format!("Failed to insert '{name}': {e}"))
                }
            })?;

        Ok(PostgreSQLCountry::from_row(&row)?.to_domain())
    }

    async fn update(&mut self, id: i64, fields: &CountryFields) -> Result<()> {
        let query = r#"
            UPDATE countries SET
                capital = $2,
                region = $3,
                population = $4,
                currency_code = $5,
                exchange_rate = $6,
                estimated_gdp = $7,
                flag_url = $8,
                last_refreshed_at = $9,
                updated_at = NOW()
            WHERE id = $1
        "#;
        let currency_code = fields.currency_code.as_ref().map(|c| c.as_str());

        let updated = self
            .conn()?
            .execute(
                query,
                &[
                    &id,
                    &fields.capital,
                    &fields.region,
                    &fields.population,
                    &currency_code,
                    &fields.exchange_rate,
                    &fields.estimated_gdp,
                    &fields.flag_url,
                    &fields.last_refreshed_at,
                ],
            )
            .await
            .map_err(|e| StoreError::WriteFailed(format!("Failed to update country {id}: {e}")))?;

        if updated == 0 {
            return Err(StoreError::WriteFailed(format!("no country with id {id}")).into());
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.finish("COMMIT").await?;
        tracing::debug!("PostgreSQL transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.finish("ROLLBACK").await?;
        tracing::debug!("PostgreSQL transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filters() {
        let (query, params) = list_query(&CountryFilter::default());
        assert!(query.ends_with("FROM countries ORDER BY id ASC"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_list_query_with_filters() {
        let filter = CountryFilter {
            region: Some("Africa".to_string()),
            currency: Some("NGN".to_string()),
            sort: CountrySort::GdpDesc,
        };
        let (query, params) = list_query(&filter);

        assert!(query.contains("WHERE LOWER(region) = LOWER($1) AND LOWER(currency_code) = LOWER($2)"));
        assert!(query.ends_with("ORDER BY estimated_gdp DESC NULLS LAST, name ASC"));
        assert_eq!(params, vec!["Africa".to_string(), "NGN".to_string()]);
    }

    #[test]
    fn test_currency_only_filter_uses_first_placeholder() {
        let filter = CountryFilter {
            currency: Some("EUR".to_string()),
            ..Default::default()
        };
        let (query, _) = list_query(&filter);
        assert!(query.contains("LOWER(currency_code) = LOWER($1)"));
    }

    #[test]
    fn test_order_clause_keeps_unknown_gdp_last() {
        assert!(order_clause(CountrySort::GdpAsc).contains("NULLS LAST"));
        assert!(order_clause(CountrySort::GdpDesc).contains("NULLS LAST"));
    }
}
