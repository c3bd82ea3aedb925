use crate::error::QueryError;
use crate::mapper::map_catalog;
use crate::QueryService;
use core_types::CatalogEntry;

impl QueryService {
    /// Every known country with its latest year, latest `gti` and that year's
    /// confidence tier, sorted by name. Countries without records are listed
    /// with those three fields empty.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, QueryError> {
        let rows = self.store().fetch_catalog().await?;

        let mut entries = rows
            .into_iter()
            .map(map_catalog)
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(countries = entries.len(), "Catalog assembled.");
        Ok(entries)
    }
}
