use crate::error::QueryError;
use chrono::{Datelike, Utc};
use database::TrustStore;

/// Picks the year a snapshot is taken for.
///
/// A requested year is used as is, even if nothing is stored for it. Without
/// one, the latest stored year is used. When storage holds no records at all
/// the current calendar year is returned; it matches nothing, so the snapshot
/// comes back empty rather than failing.
// TODO: an empty store should get its own "no data" signal instead of a
// year that cannot match; changing it alters the snapshot response contract.
pub async fn resolve_year(
    store: &dyn TrustStore,
    requested: Option<i32>,
) -> Result<i32, QueryError> {
    if let Some(year) = requested {
        return Ok(year);
    }

    match store.fetch_max_year().await? {
        Some(year) => Ok(year),
        None => {
            let year = Utc::now().year();
            tracing::debug!(year, "No stored records; snapshot falls back to the current year.");
            Ok(year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{MemoryStore, RecordRow};

    #[tokio::test]
    async fn requested_year_is_used_verbatim() {
        let store = MemoryStore::new().with_record(RecordRow::new("SWE", 2020));
        assert_eq!(resolve_year(&store, Some(1999)).await.unwrap(), 1999);
    }

    #[tokio::test]
    async fn missing_year_resolves_to_the_latest_stored_year() {
        let store = MemoryStore::new()
            .with_record(RecordRow::new("SWE", 2020))
            .with_record(RecordRow::new("SWE", 2023))
            .with_record(RecordRow::new("USA", 2021));
        assert_eq!(resolve_year(&store, None).await.unwrap(), 2023);
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_the_current_year() {
        let store = MemoryStore::new();
        assert_eq!(resolve_year(&store, None).await.unwrap(), Utc::now().year());
    }

    #[tokio::test]
    async fn requested_year_skips_storage_entirely() {
        let store = MemoryStore::unavailable();
        assert_eq!(resolve_year(&store, Some(2022)).await.unwrap(), 2022);
        assert!(matches!(
            resolve_year(&store, None).await,
            Err(QueryError::StorageUnavailable(_))
        ));
    }
}
