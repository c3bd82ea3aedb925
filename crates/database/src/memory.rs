use crate::error::DbError;
use crate::rows::{CatalogRow, CountryRow, RecordRow, ScoreRow};
use crate::store::TrustStore;
use async_trait::async_trait;
use core_types::{Pillar, YearRange};
use std::sync::atomic::{AtomicUsize, Ordering};

/// An in-process `TrustStore` holding raw rows, with the same ordering and
/// join semantics as the PostgreSQL queries.
///
/// It counts the series reads it serves and can be switched into a failing
/// mode where every call reports the pool as timed out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    countries: Vec<CountryRow>,
    records: Vec<RecordRow>,
    unavailable: bool,
    series_reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database could not be reached.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_country(mut self, iso3: &str, name: &str, region: Option<&str>) -> Self {
        self.countries.push(CountryRow {
            iso3: iso3.to_string(),
            name: name.to_string(),
            region: region.map(str::to_string),
        });
        self
    }

    pub fn with_record(mut self, record: RecordRow) -> Self {
        self.records.push(record);
        self
    }

    /// How many times `fetch_series` has been called.
    pub fn series_reads(&self) -> usize {
        self.series_reads.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable {
            return Err(DbError::ConnectionError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn country_name(&self, iso3: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.iso3 == iso3)
            .map(|c| c.name.as_str())
    }
}

#[async_trait]
impl TrustStore for MemoryStore {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRow>, DbError> {
        self.check_available()?;
        let mut rows: Vec<CatalogRow> = self
            .countries
            .iter()
            .map(|country| {
                let latest = self
                    .records
                    .iter()
                    .filter(|r| r.iso3 == country.iso3)
                    .max_by_key(|r| r.year);
                CatalogRow {
                    iso3: country.iso3.clone(),
                    name: country.name.clone(),
                    region: country.region.clone(),
                    latest_year: latest.map(|r| r.year),
                    latest_gti: latest.and_then(|r| r.gti.clone()),
                    confidence_tier: latest.and_then(|r| r.confidence_tier.clone()),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn fetch_max_year(&self) -> Result<Option<i32>, DbError> {
        self.check_available()?;
        Ok(self.records.iter().map(|r| r.year).max())
    }

    async fn fetch_scores_for_year(
        &self,
        year: i32,
        pillar: Pillar,
    ) -> Result<Vec<ScoreRow>, DbError> {
        self.check_available()?;
        let mut rows: Vec<ScoreRow> = self
            .records
            .iter()
            .filter(|r| r.year == year)
            .filter_map(|r| {
                let score = r.pillar_value(pillar)?;
                self.country_name(&r.iso3).map(|name| ScoreRow {
                    iso3: r.iso3.clone(),
                    year: r.year,
                    name: name.to_string(),
                    score: Some(score.to_string()),
                    confidence_tier: r.confidence_tier.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn fetch_country(&self, iso3: &str) -> Result<Option<CountryRow>, DbError> {
        self.check_available()?;
        Ok(self.countries.iter().find(|c| c.iso3 == iso3).cloned())
    }

    async fn fetch_series(&self, iso3: &str, range: YearRange) -> Result<Vec<RecordRow>, DbError> {
        self.series_reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut rows: Vec<RecordRow> = self
            .records
            .iter()
            .filter(|r| r.iso3 == iso3 && range.contains(r.year))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(rows)
    }
}
