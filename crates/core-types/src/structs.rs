use crate::enums::ConfidenceTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pillar name -> source identifiers, as stored on a single yearly record.
pub type SourcesUsed = BTreeMap<String, Vec<String>>;

/// A row of the `countries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
}

/// A typed `country_year` record.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryYearRecord {
    pub iso3: String,
    pub year: i32,
    pub gti: Option<f64>,
    pub interpersonal: Option<f64>,
    pub institutional: Option<f64>,
    pub governance: Option<f64>,
    pub confidence_tier: Option<ConfidenceTier>,
    pub confidence_score: Option<f64>,
    pub sources_used: Option<SourcesUsed>,
}

impl CountryYearRecord {
    /// A record for `(iso3, year)` with every measured field absent.
    pub fn empty(iso3: &str, year: i32) -> Self {
        Self {
            iso3: iso3.to_string(),
            year,
            gti: None,
            interpersonal: None,
            institutional: None,
            governance: None,
            confidence_tier: None,
            confidence_score: None,
            sources_used: None,
        }
    }
}

/// One entry of `GET /api/countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
    pub latest_year: Option<i32>,
    pub latest_gti: Option<f64>,
    pub confidence_tier: Option<ConfidenceTier>,
}

/// One entry of `GET /api/score`. `gti` carries the requested pillar's value,
/// whichever pillar that was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub iso3: String,
    pub year: i32,
    pub gti: Option<f64>,
    pub confidence_tier: Option<ConfidenceTier>,
}

/// A single year of a country's detail series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub year: i32,
    pub gti: Option<f64>,
    pub interpersonal: Option<f64>,
    pub institutional: Option<f64>,
    pub governance: Option<f64>,
    pub confidence_tier: Option<ConfidenceTier>,
    pub confidence_score: Option<f64>,
}

impl From<&CountryYearRecord> for SeriesEntry {
    fn from(record: &CountryYearRecord) -> Self {
        Self {
            year: record.year,
            gti: record.gti,
            interpersonal: record.interpersonal,
            institutional: record.institutional,
            governance: record.governance,
            confidence_tier: record.confidence_tier,
            confidence_score: record.confidence_score,
        }
    }
}

/// The payload of `GET /api/country/{iso3}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
    /// Newest year first.
    pub series: Vec<SeriesEntry>,
    /// Every source used for each pillar across the returned years, once each.
    pub sources_used: BTreeMap<String, Vec<String>>,
}
