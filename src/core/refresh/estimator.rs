//! Estimated GDP computation
//!
//! `estimated_gdp = population × R / rate`, where `R` is an integer drawn
//! uniformly from `[1000, 2000]` for every record.
//!
//! Results are rounded to the precision of the `countries` columns
//! (`exchange_rate NUMERIC(15,4)`, `estimated_gdp NUMERIC(20,2)`) so every
//! store holds the same values.

use crate::domain::{CurrencyCode, ExchangeRateTable};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

/// Inclusive bounds of the per-record multiplier
pub const MULTIPLIER_MIN: i64 = 1000;
pub const MULTIPLIER_MAX: i64 = 2000;

/// Decimal places kept for exchange rates
pub const RATE_SCALE: u32 = 4;

/// Decimal places kept for estimated GDP
pub const GDP_SCALE: u32 = 2;

/// Exclusive upper bound of a stored exchange rate (11 integer digits)
const RATE_LIMIT: i64 = 100_000_000_000;

/// Exclusive upper bound of a stored GDP (18 integer digits)
const GDP_LIMIT: i64 = 1_000_000_000_000_000_000;

/// Source of the per-record GDP multiplier
pub trait MultiplierSource: Send + Sync {
    /// Draw one multiplier in `[MULTIPLIER_MIN, MULTIPLIER_MAX]`
    fn draw(&self) -> i64;
}

/// Uniformly random multiplier
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMultiplier;

impl MultiplierSource for RandomMultiplier {
    fn draw(&self) -> i64 {
        rand::thread_rng().gen_range(MULTIPLIER_MIN..=MULTIPLIER_MAX)
    }
}

/// Constant multiplier, clamped to the valid range
#[derive(Debug, Clone, Copy)]
pub struct FixedMultiplier(i64);

impl FixedMultiplier {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(MULTIPLIER_MIN, MULTIPLIER_MAX))
    }
}

impl MultiplierSource for FixedMultiplier {
    fn draw(&self) -> i64 {
        self.0
    }
}

/// Exchange rate and GDP attached to one record
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub exchange_rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
}

/// Computes [`Estimate`]s against one rate snapshot
pub struct GdpEstimator {
    multiplier: Box<dyn MultiplierSource>,
}

impl GdpEstimator {
    pub fn new(multiplier: Box<dyn MultiplierSource>) -> Self {
        Self { multiplier }
    }

    /// Estimator backed by [`RandomMultiplier`]
    pub fn random() -> Self {
        Self::new(Box::new(RandomMultiplier))
    }

    /// Estimate for one record
    ///
    /// - no currency: no rate, GDP zero
    /// - currency missing from `rates`: both unknown
    /// - otherwise: the rate and `population × R / rate`, rounded
    /// - a rate or GDP too large for its column: unknown
    pub fn estimate(
        &self,
        population: i64,
        currency_code: Option<&CurrencyCode>,
        rates: &ExchangeRateTable,
    ) -> Estimate {
        let Some(code) = currency_code else {
            return Estimate {
                exchange_rate: None,
                estimated_gdp: Some(Decimal::ZERO),
            };
        };

        let Some(rate) = rates.rate_for(code) else {
            return Estimate {
                exchange_rate: None,
                estimated_gdp: None,
            };
        };

        let stored_rate = round_to(rate, RATE_SCALE);
        if stored_rate.abs() >= Decimal::from(RATE_LIMIT) {
            tracing::warn!(currency_code = %code, rate = %rate, "Exchange rate out of range; recording as unknown");
            return Estimate {
                exchange_rate: None,
                estimated_gdp: None,
            };
        }

        let multiplier = self.multiplier.draw();
        let estimated_gdp = Decimal::from(population)
            .checked_mul(Decimal::from(multiplier))
            .and_then(|product| product.checked_div(rate))
            .map(|gdp| round_to(gdp, GDP_SCALE))
            .filter(|gdp| gdp.abs() < Decimal::from(GDP_LIMIT));

        if estimated_gdp.is_none() {
            tracing::warn!(
                currency_code = %code,
                population,
                rate = %rate,
                "Estimated GDP out of range; recording as unknown"
            );
        }

        Estimate {
            exchange_rate: Some(stored_rate),
            estimated_gdp,
        }
    }
}

fn round_to(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

impl std::fmt::Debug for GdpEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GdpEstimator").finish_non_exhaustive()
    }
}
