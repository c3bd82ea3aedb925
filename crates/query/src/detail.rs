use crate::error::QueryError;
use crate::mapper::{map_country, map_record};
use crate::sources::SourceAggregator;
use crate::QueryService;
use core_types::{CountryDetail, CountryYearRecord, DetailQuery, SeriesEntry};

impl QueryService {
    /// A country's header, its series within the requested years (newest
    /// first) and the sources behind that series.
    ///
    /// An unknown country fails with `NotFound` before its series is read.
    /// The two reads are not done in one transaction.
    pub async fn detail(&self, query: &DetailQuery) -> Result<CountryDetail, QueryError> {
        let country = self
            .store()
            .fetch_country(&query.iso3)
            .await?
            .map(map_country)
            .ok_or_else(|| QueryError::NotFound(query.iso3.clone()))?;

        let rows = self.store().fetch_series(&country.iso3, query.range).await?;
        let mut records = rows
            .iter()
            .map(map_record)
            .collect::<Result<Vec<CountryYearRecord>, _>>()?;
        records.sort_by(|a, b| b.year.cmp(&a.year));

        let sources_used = SourceAggregator::from_records(&records).into_listing();
        let series: Vec<SeriesEntry> = records.iter().map(SeriesEntry::from).collect();

        tracing::debug!(
            iso3 = %country.iso3,
            years = series.len(),
            pillars_with_sources = sources_used.len(),
            "Country detail assembled."
        );
        Ok(CountryDetail {
            iso3: country.iso3,
            name: country.name,
            region: country.region,
            series,
            sources_used,
        })
    }
}
