//! Process-local country store
//!
//! The whole table sits behind one async mutex. A transaction holds the lock
//! for its lifetime and works on a staged copy that replaces the table on
//! commit, so readers never observe a partial refresh.

use crate::adapters::database::traits::{
    CountryFilter, CountrySort, CountryStore, CountryTransaction,
};
use crate::domain::{Country, CountryFields, NameKey, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    rows: BTreeMap<i64, Country>,
    next_id: i64,
}

impl MemoryTable {
    fn find(&self, key: &NameKey) -> Option<&Country> {
        self.rows.values().find(|c| &c.name_key == key)
    }
}

/// In-memory [`CountryStore`]
///
/// Cloning yields a handle onto the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryCountryStore {
    table: Arc<Mutex<MemoryTable>>,
}

impl MemoryCountryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CountryStore for MemoryCountryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn CountryTransaction>> {
        let guard = self.table.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.lock().await.rows.len() as u64)
    }

    async fn max_last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().filter_map(|c| c.last_refreshed_at).max())
    }

    async fn find_by_name(&self, key: &NameKey) -> Result<Option<Country>> {
        Ok(self.table.lock().await.find(key).cloned())
    }

    async fn list(&self, filter: &CountryFilter) -> Result<Vec<Country>> {
        let table = self.table.lock().await;
        let mut countries: Vec<Country> = table
            .rows
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        countries.sort_by(|a, b| compare(filter.sort, a, b));
        Ok(countries)
    }

    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let table = self.table.lock().await;
        let mut countries: Vec<Country> = table.rows.values().cloned().collect();
        countries.sort_by(|a, b| compare(CountrySort::GdpDesc, a, b));
        countries.truncate(limit);
        Ok(countries)
    }

    async fn delete_by_name(&self, key: &NameKey) -> Result<bool> {
        let mut table = self.table.lock().await;
        let id = table.find(key).map(|c| c.id);
        Ok(id.and_then(|id| table.rows.remove(&id)).is_some())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryTable>,
    staged: MemoryTable,
}

#[async_trait]
impl CountryTransaction for MemoryTransaction {
    async fn find_by_name(&mut self, key: &NameKey) -> Result<Option<Country>> {
        Ok(self.staged.find(key).cloned())
    }

    async fn create(&mut self, name: &str, fields: &CountryFields) -> Result<Country> {
        let key = NameKey::from_name(name);
        if self.staged.find(&key).is_some() {
            return Err(StoreError::Conflict(format!("country '{name}' already exists")).into());
        }

        self.staged.next_id += 1;
        let id = self.staged.next_id;
        let country = Country::create(id, name, fields.clone(), Utc::now());
        self.staged.rows.insert(id, country.clone());
        Ok(country)
    }

    async fn update(&mut self, id: i64, fields: &CountryFields) -> Result<()> {
        let country = self
            .staged
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::WriteFailed(format!("no country with id {id}")))?;
        country.apply(fields.clone(), Utc::now());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

/// Absent values sort last regardless of direction
fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(sort: CountrySort, a: &Country, b: &Country) -> Ordering {
    let primary = match sort {
        CountrySort::Id => a.id.cmp(&b.id),
        CountrySort::GdpDesc => nulls_last(a.estimated_gdp, b.estimated_gdp, true),
        CountrySort::GdpAsc => nulls_last(a.estimated_gdp, b.estimated_gdp, false),
        CountrySort::NameAsc => a.name.cmp(&b.name),
        CountrySort::NameDesc => b.name.cmp(&a.name),
        CountrySort::PopulationAsc => a.population.cmp(&b.population),
        CountrySort::PopulationDesc => b.population.cmp(&a.population),
    };
    primary.then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;
    use rust_decimal::Decimal;

    fn fields(population: i64, gdp: Option<i64>) -> CountryFields {
        CountryFields {
            capital: None,
            region: Some("Europe".to_string()),
            population,
            currency_code: Some(CurrencyCode::new("EUR")),
            exchange_rate: Some(Decimal::ONE),
            estimated_gdp: gdp.map(Decimal::from),
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    async fn seed(store: &MemoryCountryStore, rows: &[(&str, Option<i64>)]) {
        let mut tx = store.begin().await.unwrap();
        for (name, gdp) in rows {
            tx.create(name, &fields(10, *gdp)).await.unwrap();
        }
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_commit_makes_rows_visible() {
        let store = MemoryCountryStore::new();
        seed(&store, &[("France", Some(5))]).await;

        assert_eq!(store.count().await.unwrap(), 1);
        let found = store
            .find_by_name(&NameKey::from_name("FRANCE"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "France");
        assert_eq!(found.id, 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let store = MemoryCountryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create("France", &fields(10, None)).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = MemoryCountryStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.create("France", &fields(10, None)).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_key() {
        let store = MemoryCountryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create("France", &fields(10, None)).await.unwrap();
        let err = tx.create("france", &fields(10, None)).await.unwrap_err();

        assert!(err.to_string().contains("Conflict"));
    }

    #[tokio::test]
    async fn test_transaction_sees_own_writes() {
        let store = MemoryCountryStore::new();
        let mut tx = store.begin().await.unwrap();
        let created = tx.create("France", &fields(10, None)).await.unwrap();
        tx.update(created.id, &fields(20, Some(3))).await.unwrap();

        let found = tx
            .find_by_name(&NameKey::from_name("france"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.population, 20);
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_top_by_gdp_puts_unknown_last() {
        let store = MemoryCountryStore::new();
        seed(
            &store,
            &[("Bravo", None), ("Alpha", Some(10)), ("Charlie", Some(30)), ("Delta", Some(10))],
        )
        .await;

        let top = store.top_by_estimated_gdp(3).await.unwrap();
        let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Alpha", "Delta"]);
    }

    #[tokio::test]
    async fn test_list_sorts_and_filters() {
        let store = MemoryCountryStore::new();
        seed(&store, &[("Bravo", Some(2)), ("Alpha", Some(1))]).await;

        let filter = CountryFilter {
            region: Some("europe".to_string()),
            sort: CountrySort::NameAsc,
            ..Default::default()
        };
        let names: Vec<String> = store
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);

        let filter = CountryFilter {
            currency: Some("USD".to_string()),
            ..Default::default()
        };
        assert!(store.list(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_name() {
        let store = MemoryCountryStore::new();
        seed(&store, &[("France", None)]).await;

        assert!(store.delete_by_name(&NameKey::from_name("FRANCE")).await.unwrap());
        assert!(!store.delete_by_name(&NameKey::from_name("france")).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_max_last_refreshed_at_empty() {
        let store = MemoryCountryStore::new();
        assert_eq!(store.max_last_refreshed_at().await.unwrap(), None);
    }
}
