pub mod enums;
pub mod error;
pub mod filters;
pub mod params;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ConfidenceTier, Pillar, TrustType};
pub use error::CoreError;
pub use filters::YearRange;
pub use params::{parse_year, DetailQuery, SnapshotQuery};
pub use structs::{
    CatalogEntry, Country, CountryDetail, CountryYearRecord, SeriesEntry, SnapshotEntry,
    SourcesUsed,
};
