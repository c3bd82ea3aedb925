//! Validated request parameters.
//!
//! Everything here runs before storage is touched: a request that fails to
//! parse never reaches a query.

use crate::enums::TrustType;
use crate::error::CoreError;
use crate::filters::YearRange;

/// Parses a year given as exactly four ASCII digits.
pub fn parse_year(field: &str, raw: &str) -> Result<i32, CoreError> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid(
            field,
            format!("'{}' is not a four digit year", raw),
        ));
    }
    raw.parse::<i32>()
        .map_err(|e| CoreError::invalid(field, e.to_string()))
}

fn parse_optional_year(field: &str, raw: Option<&str>) -> Result<Option<i32>, CoreError> {
    raw.map(|value| parse_year(field, value)).transpose()
}

/// Parameters of a snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotQuery {
    /// `None` means "the latest year in storage".
    pub year: Option<i32>,
    pub trust_type: TrustType,
}

impl SnapshotQuery {
    pub fn parse(year: Option<&str>, trust_type: Option<&str>) -> Result<Self, CoreError> {
        let year = parse_optional_year("year", year)?;
        let trust_type = match trust_type {
            Some(label) => label.parse()?,
            None => TrustType::default(),
        };
        Ok(Self { year, trust_type })
    }
}

/// Parameters of a country detail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    pub iso3: String,
    pub range: YearRange,
}

impl DetailQuery {
    /// The iso3 code is trimmed and upper-cased; it is not otherwise checked,
    /// an unknown code is a lookup miss rather than a validation failure.
    pub fn parse(iso3: &str, from: Option<&str>, to: Option<&str>) -> Result<Self, CoreError> {
        let from = parse_optional_year("from", from)?;
        let to = parse_optional_year("to", to)?;
        Ok(Self {
            iso3: iso3.trim().to_ascii_uppercase(),
            range: YearRange::new(from, to),
        })
    }
}
