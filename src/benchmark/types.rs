use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::normalize;

/// Building sector; selects which benchmark table is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sector {
    Residential,
    NonResidential,
}

impl Sector {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::NonResidential => "non-residential",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (building type, region) benchmark value in long form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    pub building_type: String,
    pub region: String,
    pub benchmark_eui: f64, // kWh/m2
    pub normalized_type: String,
    pub normalized_region: String,
}

impl BenchmarkRecord {
    pub fn new(building_type: impl Into<String>, region: impl Into<String>, benchmark_eui: f64) -> Self {
        let building_type = building_type.into();
        let region = region.into();
        Self {
            normalized_type: normalize(Some(&building_type)),
            normalized_region: normalize(Some(&region)),
            building_type,
            region,
            benchmark_eui,
        }
    }
}

/// How a benchmark lookup was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Exact,
    FuzzyType,
    TypeOkRegionMiss,
    NoMatch,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FuzzyType => "fuzzy_type",
            Self::TypeOkRegionMiss => "type_ok_region_miss",
            Self::NoMatch => "no_match",
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Exact | Self::FuzzyType)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explanation attached to every lookup result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub status: MatchStatus,
    pub matched_type: Option<String>,
    pub matched_region: Option<String>,
    pub notes: String,
}

impl Diagnostic {
    pub fn exact(record: &BenchmarkRecord) -> Self {
        Self {
            status: MatchStatus::Exact,
            matched_type: Some(record.building_type.clone()),
            matched_region: Some(record.region.clone()),
            notes: String::new(),
        }
    }

    pub fn fuzzy_type(record: &BenchmarkRecord, input_type: &str) -> Self {
        Self {
            status: MatchStatus::FuzzyType,
            matched_type: Some(record.building_type.clone()),
            matched_region: Some(record.region.clone()),
            notes: format!(
                "Used closest building type '{}' for '{}'.",
                record.building_type, input_type
            ),
        }
    }

    pub fn region_miss(building_type: &str, region: &str) -> Self {
        Self {
            status: MatchStatus::TypeOkRegionMiss,
            matched_type: None,
            matched_region: None,
            notes: format!(
                "Region '{}' not valid for building type '{}'.",
                region, building_type
            ),
        }
    }

    pub fn no_match(building_type: &str, region: &str) -> Self {
        Self {
            status: MatchStatus::NoMatch,
            matched_type: None,
            matched_region: None,
            notes: format!(
                "No benchmark found for type '{}' and region '{}'.",
                building_type, region
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_normalizes_once() {
        let record = BenchmarkRecord::new("Low\u{2013}Rise  Apartment", " Atlantic ", 210.0);
        assert_eq!(record.building_type, "Low\u{2013}Rise  Apartment");
        assert_eq!(record.normalized_type, "low-rise apartment");
        assert_eq!(record.normalized_region, "atlantic");
    }

    #[test]
    fn test_match_status_strings() {
        assert_eq!(MatchStatus::Exact.as_str(), "exact");
        assert_eq!(MatchStatus::FuzzyType.as_str(), "fuzzy_type");
        assert_eq!(MatchStatus::TypeOkRegionMiss.as_str(), "type_ok_region_miss");
        assert_eq!(MatchStatus::NoMatch.to_string(), "no_match");
    }

    #[test]
    fn test_match_status_serializes_snake_case() {
        let json = serde_json::to_string(&MatchStatus::TypeOkRegionMiss).unwrap();
        assert_eq!(json, "\"type_ok_region_miss\"");
    }

    #[test]
    fn test_fuzzy_note_names_both_types() {
        let record = BenchmarkRecord::new("Office", "Atlantic", 200.0);
        let diag = Diagnostic::fuzzy_type(&record, "Offce");
        assert!(diag.notes.contains("'Office'"));
        assert!(diag.notes.contains("'Offce'"));
        assert_eq!(diag.matched_type.as_deref(), Some("Office"));
    }

    #[test]
    fn test_sector_display() {
        assert_eq!(Sector::NonResidential.to_string(), "non-residential");
        assert_eq!(Sector::Residential.to_string(), "residential");
    }
}
