//! Refresh orchestration
//!
//! Fetch both sources, then validate, estimate and upsert every record inside a
//! single store transaction. The first invalid record rolls the whole batch
//! back. The summary image is rendered only after commit.

use super::estimator::GdpEstimator;
use super::outcome::{RefreshError, RefreshReport};
use super::validator;
use crate::adapters::database::{CountryStore, CountryTransaction};
use crate::adapters::sources::{ExternalDataClient, ReferenceDataSource};
use crate::config::MeridianConfig;
use crate::core::summary::SummaryRenderer;
use crate::domain::{
    CountryFields, ExchangeRateTable, MeridianError, NameKey, RawCountryRecord, Result, SourceError,
};
use crate::{log_chunk_processing, log_refresh_start};
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Row counts from one reconciliation pass
#[derive(Debug, Default, Clone, Copy)]
struct Reconciled {
    created: usize,
    updated: usize,
}

/// Drives a refresh from fetch to rendered summary
///
/// # Example
///
/// ```no_run
/// use meridian::adapters::database::create_country_store;
/// use meridian::config::load_config;
/// use meridian::core::refresh::{ReconciliationEngine, RefreshResult};
///
/// # async fn example() -> meridian::domain::Result<()> {
/// let config = load_config("meridian.toml")?;
/// let store = create_country_store(&config).await?;
/// let engine = ReconciliationEngine::from_config(&config, store)?;
///
/// let outcome = engine.refresh().await;
/// println!("{}", serde_json::to_string(&RefreshResult::from(&outcome))?);
/// # Ok(())
/// # }
/// ```
pub struct ReconciliationEngine {
    sources: Arc<dyn ReferenceDataSource>,
    store: Arc<dyn CountryStore + Send + Sync>,
    estimator: GdpEstimator,
    renderer: SummaryRenderer,
    chunk_size: usize,
    in_flight: Mutex<()>,
}

impl ReconciliationEngine {
    pub fn new(
        sources: Arc<dyn ReferenceDataSource>,
        store: Arc<dyn CountryStore + Send + Sync>,
        estimator: GdpEstimator,
        renderer: SummaryRenderer,
        chunk_size: usize,
    ) -> Self {
        Self {
            sources,
            store,
            estimator,
            renderer,
            chunk_size: chunk_size.max(1),
            in_flight: Mutex::new(()),
        }
    }

    /// Engine wired with the HTTP sources, a random multiplier and the PNG renderer
    pub fn from_config(
        config: &MeridianConfig,
        store: Arc<dyn CountryStore + Send + Sync>,
    ) -> Result<Self> {
        let sources = Arc::new(ExternalDataClient::new(config.sources.clone())?);
        let renderer = SummaryRenderer::with_defaults(Arc::clone(&store), config.summary.clone());

        Ok(Self::new(
            sources,
            store,
            GdpEstimator::random(),
            renderer,
            config.refresh.chunk_size,
        ))
    }

    /// The renderer used after commit
    pub fn renderer(&self) -> &SummaryRenderer {
        &self.renderer
    }

    /// Run one refresh
    ///
    /// `Err` means nothing was committed. `Ok` means persistence committed; the
    /// report carries the artifact outcome separately.
    pub async fn refresh(&self) -> std::result::Result<RefreshReport, RefreshError> {
        let _in_flight = self.in_flight.try_lock().map_err(|_| {
            tracing::warn!("Refresh requested while another refresh is running");
            RefreshError::InProgress
        })?;

        let started = Instant::now();
        let (countries_url, rates_url) = self.sources.endpoints();
        log_refresh_start!(countries_url, rates_url);

        let records = self.sources.fetch_countries().await.map_err(unavailable)?;
        let rates = self
            .sources
            .fetch_exchange_rates()
            .await
            .map_err(unavailable)?;

        tracing::info!(
            records = records.len(),
            rates = rates.len(),
            "Upstream data fetched"
        );

        let refreshed_at = Utc::now().trunc_subsecs(0);

        let mut tx = self.store.begin().await.map_err(internal)?;
        let reconciled = match self
            .reconcile(tx.as_mut(), &records, &rates, refreshed_at)
            .await
        {
            Ok(reconciled) => reconciled,
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                tracing::warn!(error = %err, "Refresh rolled back");
                return Err(err);
            }
        };
        tx.commit().await.map_err(internal)?;

        let duration = started.elapsed();
        let artifact = self.renderer.render(refreshed_at).await;

        let report = RefreshReport {
            last_refreshed_at: refreshed_at,
            total: records.len(),
            created: reconciled.created,
            updated: reconciled.updated,
            duration,
            artifact,
        };
        report.log_summary();
        Ok(report)
    }

    async fn reconcile(
        &self,
        tx: &mut dyn CountryTransaction,
        records: &[RawCountryRecord],
        rates: &ExchangeRateTable,
        refreshed_at: DateTime<Utc>,
    ) -> std::result::Result<Reconciled, RefreshError> {
        let total = records.len();
        let mut counts = Reconciled::default();

        for (chunk_index, chunk) in records.chunks(self.chunk_size).enumerate() {
            log_chunk_processing!(chunk_index * self.chunk_size + chunk.len(), total);

            for (offset, raw) in chunk.iter().enumerate() {
                let record = validator::validate(raw).map_err(|errors| {
                    tracing::warn!(
                        index = chunk_index * self.chunk_size + offset,
                        name = %raw.name,
                        errors = %errors,
                        "Record failed validation"
                    );
                    RefreshError::Validation(errors)
                })?;

                let estimate = self.estimator.estimate(
                    record.population,
                    record.currency_code.as_ref(),
                    rates,
                );

                let fields = CountryFields {
                    capital: record.capital,
                    region: record.region,
                    population: record.population,
                    currency_code: record.currency_code,
                    exchange_rate: estimate.exchange_rate,
                    estimated_gdp: estimate.estimated_gdp,
                    flag_url: record.flag,
                    last_refreshed_at: refreshed_at,
                };

                let key = NameKey::from_name(&record.name);
                match tx.find_by_name(&key).await.map_err(internal)? {
                    Some(existing) => {
                        tx.update(existing.id, &fields).await.map_err(internal)?;
                        counts.updated += 1;
                    }
                    None => {
                        tx.create(&record.name, &fields).await.map_err(internal)?;
                        counts.created += 1;
                    }
                }
            }
        }

        Ok(counts)
    }
}

fn unavailable(err: SourceError) -> RefreshError {
    tracing::error!(error = %err, "Upstream source unavailable");
    RefreshError::Unavailable(err.data_source())
}

fn internal(err: MeridianError) -> RefreshError {
    crate::log_error_with_context!(&err, "Refresh failed before commit");
    RefreshError::Internal(err.to_string())
}
