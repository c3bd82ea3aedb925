use crate::error::QueryError;
use crate::mapper::map_score;
use crate::year::resolve_year;
use crate::QueryService;
use core_types::{SnapshotEntry, SnapshotQuery};

impl QueryService {
    /// One score per country for a single year and pillar, sorted by country
    /// name. Countries with no value for the pillar that year are left out, so
    /// a year without data gives an empty list.
    pub async fn snapshot(&self, query: SnapshotQuery) -> Result<Vec<SnapshotEntry>, QueryError> {
        let year = resolve_year(self.store(), query.year).await?;
        let pillar = query.trust_type.pillar();

        let mut rows = self.store().fetch_scores_for_year(year, pillar).await?;
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        let entries = rows
            .into_iter()
            .filter(|row| row.score.is_some())
            .map(map_score)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            year,
            trust_type = query.trust_type.as_str(),
            pillar = %pillar,
            entries = entries.len(),
            "Snapshot assembled."
        );
        Ok(entries)
    }
}
