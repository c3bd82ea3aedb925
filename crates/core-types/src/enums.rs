use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four stored trust dimensions of a `country_year` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Gti,
    Interpersonal,
    Institutional,
    Governance,
}

impl Pillar {
    /// The storage column (and JSON key) that holds this pillar.
    pub fn column(&self) -> &'static str {
        match self {
            Pillar::Gti => "gti",
            Pillar::Interpersonal => "interpersonal",
            Pillar::Institutional => "institutional",
            Pillar::Governance => "governance",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The trust type a client can ask a snapshot for.
///
/// `Proxy` has no column of its own: the proxy index is the governance pillar,
/// so both labels read the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustType {
    #[default]
    Core,
    Interpersonal,
    Institutional,
    Governance,
    Proxy,
}

impl TrustType {
    /// Maps the requested trust type onto the pillar that is actually read.
    pub fn pillar(&self) -> Pillar {
        match self {
            TrustType::Core => Pillar::Gti,
            TrustType::Interpersonal => Pillar::Interpersonal,
            TrustType::Institutional => Pillar::Institutional,
            TrustType::Governance | TrustType::Proxy => Pillar::Governance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustType::Core => "core",
            TrustType::Interpersonal => "interpersonal",
            TrustType::Institutional => "institutional",
            TrustType::Governance => "governance",
            TrustType::Proxy => "proxy",
        }
    }
}

impl FromStr for TrustType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(TrustType::Core),
            "interpersonal" => Ok(TrustType::Interpersonal),
            "institutional" => Ok(TrustType::Institutional),
            "governance" => Ok(TrustType::Governance),
            "proxy" => Ok(TrustType::Proxy),
            other => Err(CoreError::invalid(
                "trust_type",
                format!(
                    "'{}' is not one of core, interpersonal, institutional, governance, proxy",
                    other
                ),
            )),
        }
    }
}

/// Ordinal data-quality label of a yearly record. `A` is the most confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    A,
    B,
    C,
}

impl FromStr for ConfidenceTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Fixed-width CHAR columns come back space padded.
        match s.trim() {
            "A" => Ok(ConfidenceTier::A),
            "B" => Ok(ConfidenceTier::B),
            "C" => Ok(ConfidenceTier::C),
            other => Err(CoreError::invalid(
                "confidence_tier",
                format!("'{}' is not one of A, B, C", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_and_governance_read_the_same_pillar() {
        assert_eq!(TrustType::Proxy.pillar(), TrustType::Governance.pillar());
        assert_eq!(TrustType::Proxy.pillar(), Pillar::Governance);
    }

    #[test]
    fn core_reads_gti() {
        assert_eq!(TrustType::Core.pillar(), Pillar::Gti);
        assert_eq!(TrustType::Core.pillar().column(), "gti");
        assert_eq!(TrustType::default(), TrustType::Core);
    }

    #[test]
    fn every_label_round_trips_through_from_str() {
        for label in ["core", "interpersonal", "institutional", "governance", "proxy"] {
            let parsed: TrustType = label.parse().unwrap();
            assert_eq!(parsed.as_str(), label);
        }
    }

    #[test]
    fn unknown_trust_type_is_rejected() {
        let err = "Core".parse::<TrustType>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "trust_type"));
        assert!("".parse::<TrustType>().is_err());
    }

    #[test]
    fn confidence_tier_parses_padded_values_and_orders_a_first() {
        assert_eq!("B ".parse::<ConfidenceTier>().unwrap(), ConfidenceTier::B);
        assert!("D".parse::<ConfidenceTier>().is_err());
        assert!(ConfidenceTier::A < ConfidenceTier::C);
        assert_eq!(serde_json::to_string(&ConfidenceTier::A).unwrap(), "\"A\"");
    }
}
