//! HTTP client for the countries and exchange-rate sources

use super::models::RatesResponse;
use super::ReferenceDataSource;
use crate::config::SourcesConfig;
use crate::domain::{
    DataSource, ExchangeRateTable, MeridianError, RawCountryRecord, Result, SourceError,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Fetches the two upstream datasets over HTTP
///
/// Each request is bounded by `sources.timeout_seconds`. Any failure (transport,
/// timeout, non-2xx status, undecodable body) surfaces as a [`SourceError`]
/// tagged with the dataset it belongs to.
///
/// # Example
///
/// ```no_run
/// use meridian::adapters::sources::{ExternalDataClient, ReferenceDataSource};
/// use meridian::config::SourcesConfig;
///
/// # async fn example() -> meridian::domain::Result<()> {
/// let client = ExternalDataClient::new(SourcesConfig::default())?;
/// let countries = client.fetch_countries().await?;
/// println!("{} countries", countries.len());
/// # Ok(())
/// # }
/// ```
pub struct ExternalDataClient {
    client: Client,
    config: SourcesConfig,
}

impl ExternalDataClient {
    /// Builds the client with the configured timeout
    pub fn new(config: SourcesConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("meridian/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeridianError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source: DataSource,
        url: &str,
    ) -> std::result::Result<T, SourceError> {
        tracing::debug!(source = %source, url = %url, "Fetching upstream data");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.classify(source, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(source = %source, status = status.as_u16(), "Upstream returned an error status");
            return Err(SourceError::Status {
                source_name: source,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(source, e))?;

        serde_json::from_slice(&body).map_err(|e| SourceError::InvalidBody {
            source_name: source,
            message: e.to_string(),
        })
    }

    fn classify(&self, source: DataSource, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                source_name: source,
                seconds: self.config.timeout_seconds,
            }
        } else {
            SourceError::ConnectionFailed {
                source_name: source,
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl ReferenceDataSource for ExternalDataClient {
    async fn fetch_countries(&self) -> std::result::Result<Vec<RawCountryRecord>, SourceError> {
        let entries: Vec<Value> = self
            .get_json(DataSource::Countries, &self.config.countries_url)
            .await?;

        // Entries that are not objects become empty records and fail validation
        let records: Vec<RawCountryRecord> = entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect();
        tracing::debug!(count = records.len(), "Fetched country records");
        Ok(records)
    }

    async fn fetch_exchange_rates(&self) -> std::result::Result<ExchangeRateTable, SourceError> {
        let body: RatesResponse = self
            .get_json(DataSource::ExchangeRates, &self.config.exchange_rates_url)
            .await?;
        let table = body.into_table();
        tracing::debug!(count = table.len(), "Fetched exchange rates");
        Ok(table)
    }

    fn endpoints(&self) -> (&str, &str) {
        (&self.config.countries_url, &self.config.exchange_rates_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;
    use rust_decimal::Decimal;

    fn config_for(server: &mockito::ServerGuard) -> SourcesConfig {
        SourcesConfig {
            countries_url: format!("{}/countries", server.url()),
            exchange_rates_url: format!("{}/rates", server.url()),
            timeout_seconds: 2,
        }
    }

    #[tokio::test]
    async fn test_fetch_countries_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/countries")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"name":"Nigeria","capital":"Abuja","region":"Africa","population":206139589,
                    "flag":"https://flags.example/ng.svg","currencies":[{"code":"NGN","name":"Naira"}]}]"#,
            )
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let records = client.fetch_countries().await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Nigeria");
        assert_eq!(records[0].currencies[0]["code"], "NGN");
    }

    #[tokio::test]
    async fn test_fetch_countries_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/countries")
            .with_status(502)
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let err = client.fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 502, .. }));
        assert_eq!(err.data_source(), DataSource::Countries);
    }

    #[tokio::test]
    async fn test_fetch_countries_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/countries")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let err = client.fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_countries_keeps_non_object_entries() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/countries")
            .with_status(200)
            .with_body(r#"[{"name":"Italy","population":100}, null, "Atlantis", 7]"#)
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let records = client.fetch_countries().await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].name, "Italy");
        for record in &records[1..] {
            assert_eq!(record, &RawCountryRecord::default());
        }
    }

    #[tokio::test]
    async fn test_fetch_countries_non_array_body_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/countries")
            .with_status(200)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let err = client.fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_exchange_rates_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rates")
            .with_status(200)
            .with_body(r#"{"result":"success","base_code":"USD","rates":{"USD":1,"NGN":1600.23}}"#)
            .create_async()
            .await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let table = client.fetch_exchange_rates().await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rate_for(&CurrencyCode::new("NGN")),
            Some(Decimal::new(160023, 2))
        );
    }

    #[tokio::test]
    async fn test_fetch_exchange_rates_error_is_tagged() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/rates").with_status(500).create_async().await;

        let client = ExternalDataClient::new(config_for(&server)).unwrap();
        let err = client.fetch_exchange_rates().await.unwrap_err();

        assert_eq!(err.data_source(), DataSource::ExchangeRates);
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_failed() {
        let config = SourcesConfig {
            countries_url: "http://127.0.0.1:1/countries".to_string(),
            exchange_rates_url: "http://127.0.0.1:1/rates".to_string(),
            timeout_seconds: 2,
        };

        let client = ExternalDataClient::new(config).unwrap();
        let err = client.fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::ConnectionFailed { .. }));
    }
}
