//! Turns raw storage rows into typed records.
//!
//! A null column is "no value", never zero. A column that is present but does
//! not parse fails the whole request with `DataIntegrity`.

use crate::error::QueryError;
use core_types::{
    CatalogEntry, ConfidenceTier, Country, CountryYearRecord, SnapshotEntry, SourcesUsed,
};
use database::{CatalogRow, CountryRow, RecordRow, ScoreRow};

/// Parses a stored numeric column.
pub fn parse_score(field: &str, raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(text) = raw else {
        return Ok(None);
    };
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("{} '{}' is not a finite number", field, text)),
    }
}

pub fn parse_tier(raw: Option<&str>) -> Result<Option<ConfidenceTier>, String> {
    raw.map(|text| text.parse::<ConfidenceTier>().map_err(|e| e.to_string()))
        .transpose()
}

/// Deserializes the `sources_used` blob. A JSON `null` is the same as no blob.
pub fn parse_sources(raw: Option<&str>) -> Result<Option<SourcesUsed>, String> {
    let Some(text) = raw else {
        return Ok(None);
    };
    serde_json::from_str::<Option<SourcesUsed>>(text)
        .map_err(|e| format!("sources_used is not a pillar -> [source] map: {}", e))
}

fn integrity(iso3: &str, year: Option<i32>, detail: String) -> QueryError {
    match year {
        Some(year) => QueryError::DataIntegrity(format!("{}/{}: {}", iso3, year, detail)),
        None => QueryError::DataIntegrity(format!("{}: {}", iso3, detail)),
    }
}

pub fn map_record(row: &RecordRow) -> Result<CountryYearRecord, QueryError> {
    let fail = |detail| integrity(&row.iso3, Some(row.year), detail);
    Ok(CountryYearRecord {
        iso3: row.iso3.clone(),
        year: row.year,
        gti: parse_score("gti", row.gti.as_deref()).map_err(fail)?,
        interpersonal: parse_score("interpersonal", row.interpersonal.as_deref()).map_err(fail)?,
        institutional: parse_score("institutional", row.institutional.as_deref()).map_err(fail)?,
        governance: parse_score("governance", row.governance.as_deref()).map_err(fail)?,
        confidence_tier: parse_tier(row.confidence_tier.as_deref()).map_err(fail)?,
        confidence_score: parse_score("confidence_score", row.confidence_score.as_deref())
            .map_err(fail)?,
        sources_used: parse_sources(row.sources_used.as_deref()).map_err(fail)?,
    })
}

/// Maps one snapshot row. Only the selected score and the tier are read.
pub fn map_score(row: ScoreRow) -> Result<SnapshotEntry, QueryError> {
    let fail = |detail| integrity(&row.iso3, Some(row.year), detail);
    let gti = parse_score("score", row.score.as_deref()).map_err(fail)?;
    let confidence_tier = parse_tier(row.confidence_tier.as_deref()).map_err(fail)?;
    Ok(SnapshotEntry {
        iso3: row.iso3,
        year: row.year,
        gti,
        confidence_tier,
    })
}

pub fn map_catalog(row: CatalogRow) -> Result<CatalogEntry, QueryError> {
    let fail = |detail| integrity(&row.iso3, row.latest_year, detail);
    let latest_gti = parse_score("gti", row.latest_gti.as_deref()).map_err(fail)?;
    let confidence_tier = parse_tier(row.confidence_tier.as_deref()).map_err(fail)?;
    Ok(CatalogEntry {
        iso3: row.iso3,
        name: row.name,
        region: row.region,
        latest_year: row.latest_year,
        latest_gti,
        confidence_tier,
    })
}

pub fn map_country(row: CountryRow) -> Country {
    Country {
        iso3: row.iso3,
        name: row.name,
        region: row.region,
    }
}
