use crate::error::DbError;
use crate::rows::{CatalogRow, CountryRow, RecordRow, ScoreRow};
use async_trait::async_trait;
use core_types::{Pillar, YearRange};

/// The read queries the trust index API needs from storage.
///
/// Every method is a single independent read; callers get no isolation
/// between two calls.
#[async_trait]
pub trait TrustStore: Send + Sync {
    /// Every country joined to its latest-year record, ordered by name.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRow>, DbError>;

    /// The highest year of any record, or `None` when there are no records.
    async fn fetch_max_year(&self) -> Result<Option<i32>, DbError>;

    /// The `pillar` score of every country that has one for `year`, ordered by
    /// country name. Rows where the pillar is null are not returned.
    async fn fetch_scores_for_year(
        &self,
        year: i32,
        pillar: Pillar,
    ) -> Result<Vec<ScoreRow>, DbError>;

    async fn fetch_country(&self, iso3: &str) -> Result<Option<CountryRow>, DbError>;

    /// A country's records within `range`, newest year first.
    async fn fetch_series(&self, iso3: &str, range: YearRange) -> Result<Vec<RecordRow>, DbError>;
}
