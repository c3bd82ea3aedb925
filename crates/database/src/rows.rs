//! Rows exactly as storage returns them.
//!
//! Numeric columns are read as text (`NUMERIC::text`) and the `sources_used`
//! JSONB column as its serialized form; turning them into typed values, and
//! rejecting what does not parse, is left to the caller.

use core_types::Pillar;
use sqlx::FromRow;

/// A row of the `countries` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CountryRow {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
}

/// A country joined to its latest `country_year` record, if it has one.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CatalogRow {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
    pub latest_year: Option<i32>,
    pub latest_gti: Option<String>,
    pub confidence_tier: Option<String>,
}

/// A row of the `country_year` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecordRow {
    pub iso3: String,
    pub year: i32,
    pub gti: Option<String>,
    pub interpersonal: Option<String>,
    pub institutional: Option<String>,
    pub governance: Option<String>,
    pub confidence_tier: Option<String>,
    pub confidence_score: Option<String>,
    pub sources_used: Option<String>,
}

impl RecordRow {
    /// A row for `(iso3, year)` with every nullable column null.
    pub fn new(iso3: &str, year: i32) -> Self {
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

    /// The raw column holding `pillar`.
    pub fn pillar_value(&self, pillar: Pillar) -> Option<&str> {
        match pillar {
            Pillar::Gti => self.gti.as_deref(),
            Pillar::Interpersonal => self.interpersonal.as_deref(),
            Pillar::Institutional => self.institutional.as_deref(),
            Pillar::Governance => self.governance.as_deref(),
        }
    }
}

/// One country's score for a single pillar and year, with the display name
/// snapshots are ordered by. `score` is the selected pillar's column.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScoreRow {
    pub iso3: String,
    pub year: i32,
    pub name: String,
    pub score: Option<String>,
    pub confidence_tier: Option<String>,
}
