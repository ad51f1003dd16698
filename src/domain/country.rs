//! Persisted country entity

use super::ids::{CurrencyCode, NameKey};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A country row as persisted by the store
///
/// `name` keeps the spelling of the first refresh that created the row;
/// later refreshes match it through `name_key` and never rename it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    /// Surrogate identifier assigned by the store
    pub id: i64,

    /// Display name
    pub name: String,

    /// Canonical lowercase key, unique across the table
    #[serde(skip_serializing)]
    pub name_key: NameKey,

    /// Capital city
    pub capital: Option<String>,

    /// Region (e.g. "Europe")
    pub region: Option<String>,

    /// Population count
    pub population: i64,

    /// First currency listed by the source
    pub currency_code: Option<CurrencyCode>,

    /// Units of `currency_code` per USD at refresh time
    pub exchange_rate: Option<Decimal>,

    /// Estimated GDP; `None` means unknown, which is distinct from zero
    pub estimated_gdp: Option<Decimal>,

    /// Flag image URL
    pub flag_url: Option<String>,

    /// Snapshot time of the refresh that last touched this row
    pub last_refreshed_at: Option<DateTime<Utc>>,

    /// Row creation time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Country {
    /// Creates a new row from reconciled fields
    pub fn create(id: i64, name: impl Into<String>, fields: CountryFields, now: DateTime<Utc>) -> Self {
        let name = name.into();
        let mut country = Self {
            id,
            name_key: NameKey::from_name(&name),
            name,
            capital: None,
            region: None,
            population: 0,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: None,
            flag_url: None,
            last_refreshed_at: None,
            created_at: now,
            updated_at: now,
        };
        country.apply(fields, now);
        country
    }

    /// Overwrites every refreshable field in place
    ///
    /// Identity (`id`, `name`, `name_key`) and `created_at` are untouched.
    pub fn apply(&mut self, fields: CountryFields, now: DateTime<Utc>) {
        self.capital = fields.capital;
        self.region = fields.region;
        self.population = fields.population;
        self.currency_code = fields.currency_code;
        self.exchange_rate = fields.exchange_rate;
        self.estimated_gdp = fields.estimated_gdp;
        self.flag_url = fields.flag_url;
        self.last_refreshed_at = Some(fields.last_refreshed_at);
        self.updated_at = now;
    }
}

/// The set of columns written by a refresh, for both create and update
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFields {
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<CurrencyCode>,
    pub exchange_rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(population: i64, at: DateTime<Utc>) -> CountryFields {
        CountryFields {
            capital: Some("Paris".to_string()),
            region: Some("Europe".to_string()),
            population,
            currency_code: Some(CurrencyCode::new("EUR")),
            exchange_rate: Some(Decimal::new(92, 2)),
            estimated_gdp: Some(Decimal::from(1000)),
            flag_url: None,
            last_refreshed_at: at,
        }
    }

    #[test]
    fn test_create_sets_key_and_timestamps() {
        let t = Utc.with_ymd_and_hms(2025, 10, 27, 8, 0, 0).unwrap();
        let country = Country::create(1, "France", fields(67, t), t);

        assert_eq!(country.name_key.as_str(), "france");
        assert_eq!(country.last_refreshed_at, Some(t));
        assert_eq!(country.created_at, t);
        assert_eq!(country.population, 67);
    }

    #[test]
    fn test_apply_preserves_identity() {
        let t0 = Utc.with_ymd_and_hms(2025, 10, 27, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 10, 28, 8, 0, 0).unwrap();
        let mut country = Country::create(7, "France", fields(67, t0), t0);

        country.apply(fields(68, t1), t1);

        assert_eq!(country.id, 7);
        assert_eq!(country.name, "France");
        assert_eq!(country.created_at, t0);
        assert_eq!(country.updated_at, t1);
        assert_eq!(country.population, 68);
        assert_eq!(country.last_refreshed_at, Some(t1));
    }

    #[test]
    fn test_serialized_country_hides_name_key() {
        let t = Utc.with_ymd_and_hms(2025, 10, 27, 8, 0, 0).unwrap();
        let country = Country::create(1, "France", fields(67, t), t);
        let json = serde_json::to_value(&country).unwrap();

        assert!(json.get("name_key").is_none());
        assert_eq!(json["currency_code"], "EUR");
    }
}
