use serde::Serialize;
use tracing::debug;

use super::sheet::{melt, Sheet};
use super::table::BenchmarkTable;
use super::types::{BenchmarkRecord, Diagnostic, Sector};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::text::{closest_match, normalize};

/// Column holding the aggregate marker that delimits the two blocks.
pub const MARKER_COLUMN: usize = 2;
/// Column holding the building type in both blocks.
pub const TYPE_COLUMN: usize = 1;

/// Region columns of the non-residential block. Its header row is not read.
pub const NON_RESIDENTIAL_REGIONS: [&str; 5] =
    ["Canada", "Atlantic", "Great Lakes", "Pacific Coast", "Other"];

/// Both sector tables, parsed once from the raw benchmark sheet.
///
/// Read-only after construction; share it freely across pipelines.
#[derive(Debug, Clone)]
pub struct BenchmarkRepository {
    non_residential: BenchmarkTable,
    residential: BenchmarkTable,
    fuzzy_cutoff: f64,
}

/// Selectable building types and regions per sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceListing {
    pub non_residential_types: Vec<String>,
    pub residential_types: Vec<String>,
    pub non_residential_regions: Vec<String>,
    pub residential_regions: Vec<String>,
}

impl BenchmarkRepository {
    /// Parse the two stacked blocks of a wide benchmark sheet.
    ///
    /// The first row whose marker column holds the aggregate region heads the
    /// non-residential block; the second heads the residential block and
    /// supplies its region names.
    pub fn from_sheet(sheet: &Sheet, config: &EngineConfig) -> Result<Self> {
        let marker = config.aggregate_region.as_str();
        let hits = sheet.find_marker_rows(MARKER_COLUMN, marker);
        let (non_res_header, res_header) = match hits.as_slice() {
            [first, second, ..] => (*first, *second),
            _ => {
                return Err(Error::SectionBoundary {
                    sheet: sheet.name.clone(),
                    marker: marker.to_string(),
                    column: MARKER_COLUMN,
                    found: hits.len(),
                })
            }
        };

        let non_res_regions: Vec<(usize, String)> = NON_RESIDENTIAL_REGIONS
            .iter()
            .enumerate()
            .map(|(i, name)| (MARKER_COLUMN + i, name.to_string()))
            .collect();
        let non_res_records = melt(
            sheet,
            non_res_header + 1..res_header,
            TYPE_COLUMN,
            &non_res_regions,
        );

        let res_regions: Vec<(usize, String)> = (MARKER_COLUMN..)
            .map_while(|column| sheet.cell(res_header, column).map(|name| (column, name.to_string())))
            .collect();
        let res_records = melt(sheet, res_header + 1..sheet.len(), TYPE_COLUMN, &res_regions);

        debug!(
            sheet = %sheet.name,
            non_residential_header = non_res_header,
            residential_header = res_header,
            residential_regions = res_regions.len(),
            "located benchmark blocks"
        );

        Ok(Self::from_records(non_res_records, res_records, config))
    }

    /// Build a repository from already long-form records.
    pub fn from_records(
        non_residential: Vec<BenchmarkRecord>,
        residential: Vec<BenchmarkRecord>,
        config: &EngineConfig,
    ) -> Self {
        let non_residential =
            BenchmarkTable::new(Sector::NonResidential, non_residential, &config.aggregate_region);
        let residential =
            BenchmarkTable::new(Sector::Residential, residential, &config.aggregate_region);

        debug!(
            non_residential = non_residential.len(),
            residential = residential.len(),
            "parsed benchmark records"
        );

        Self {
            non_residential,
            residential,
            fuzzy_cutoff: config.fuzzy_cutoff,
        }
    }

    pub fn table(&self, sector: Sector) -> &BenchmarkTable {
        match sector {
            Sector::Residential => &self.residential,
            Sector::NonResidential => &self.non_residential,
        }
    }

    /// Residential iff the normalized type is a residential type.
    pub fn sector_for(&self, building_type: &str) -> Sector {
        if self.residential.contains_type(&normalize(Some(building_type))) {
            Sector::Residential
        } else {
            Sector::NonResidential
        }
    }

    /// Selectable regions for the sector `building_type` falls into.
    pub fn valid_regions_for_type(&self, building_type: &str) -> &[String] {
        self.table(self.sector_for(building_type)).regions()
    }

    /// Resolve a benchmark EUI for a free-text type and region.
    ///
    /// Tries an exact normalized match, then the closest building type within
    /// the sector. Unresolved lookups return `None` with a diagnostic saying
    /// whether the type or the region was at fault.
    pub fn lookup(&self, building_type: &str, region: &str) -> (Option<f64>, Diagnostic) {
        let type_key = normalize(Some(building_type));
        let region_key = normalize(Some(region));
        let table = self.table(self.sector_for(building_type));

        if let Some(record) = table.get(&type_key, &region_key) {
            return (Some(record.benchmark_eui), Diagnostic::exact(record));
        }

        if let Some(candidate) = closest_match(&type_key, table.normalized_types(), self.fuzzy_cutoff) {
            if let Some(record) = table.get(candidate, &region_key) {
                return (
                    Some(record.benchmark_eui),
                    Diagnostic::fuzzy_type(record, building_type),
                );
            }
        }

        if table.contains_type(&type_key) {
            return (None, Diagnostic::region_miss(building_type, region));
        }

        (None, Diagnostic::no_match(building_type, region))
    }

    pub fn reference(&self) -> ReferenceListing {
        ReferenceListing {
            non_residential_types: self.non_residential.building_types().to_vec(),
            residential_types: self.residential.building_types().to_vec(),
            non_residential_regions: self.non_residential.regions().to_vec(),
            residential_regions: self.residential.regions().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::testing::sample_sheet;
    use crate::benchmark::MatchStatus;

    fn repo() -> BenchmarkRepository {
        BenchmarkRepository::from_sheet(&sample_sheet(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_both_blocks() {
        let repo = repo();
        // 3 types x 5 regions minus one blank cell
        assert_eq!(repo.table(Sector::NonResidential).len(), 14);
        // 2 types x 7 regions minus one blank cell
        assert_eq!(repo.table(Sector::Residential).len(), 13);
    }

    #[test]
    fn test_missing_boundary_is_error() {
        let mut sheet = sample_sheet();
        sheet.rows.truncate(5);
        let err = BenchmarkRepository::from_sheet(&sheet, &EngineConfig::default()).unwrap_err();
        match err {
            Error::SectionBoundary { found, column, .. } => {
                assert_eq!(found, 1);
                assert_eq!(column, MARKER_COLUMN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_residential_regions_read_from_header() {
        let reference = repo().reference();
        assert_eq!(
            reference.residential_regions,
            vec!["Atlantic", "BC", "Ontario", "Prairies", "Quebec", "Territories"]
        );
        assert_eq!(
            reference.non_residential_regions,
            vec!["Atlantic", "Great Lakes", "Other", "Pacific Coast"]
        );
        assert_eq!(reference.residential_types, vec!["Low-Rise Apartment", "Single Detached"]);
        assert_eq!(
            reference.non_residential_types,
            vec!["K\u{2013}12 School", "Office", "Warehouse"]
        );
    }

    #[test]
    fn test_placeholder_rows_produce_no_records() {
        let repo = repo();
        let non_res = repo.table(Sector::NonResidential);
        assert!(!non_res.contains_type("residential"));
        assert!(!non_res.contains_type(""));
    }

    #[test]
    fn test_sector_selection() {
        let repo = repo();
        assert_eq!(repo.sector_for("low-rise  APARTMENT"), Sector::Residential);
        assert_eq!(repo.sector_for("Office"), Sector::NonResidential);
        assert_eq!(repo.sector_for("Spaceport"), Sector::NonResidential);
        assert_eq!(repo.valid_regions_for_type("Single Detached").len(), 6);
        assert_eq!(repo.valid_regions_for_type("Spaceport").len(), 4);
    }

    #[test]
    fn test_exact_lookup_echoes_source_strings() {
        let (value, diag) = repo().lookup("k-12 school", " pacific   coast ");
        assert_eq!(value, Some(140.0));
        assert_eq!(diag.status, MatchStatus::Exact);
        assert_eq!(diag.matched_type.as_deref(), Some("K\u{2013}12 School"));
        assert_eq!(diag.matched_region.as_deref(), Some("Pacific Coast"));
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn test_aggregate_region_still_queryable() {
        let (value, diag) = repo().lookup("Office", "Canada");
        assert_eq!(value, Some(190.0));
        assert_eq!(diag.status, MatchStatus::Exact);
    }

    #[test]
    fn test_fuzzy_type_lookup() {
        let (value, diag) = repo().lookup("Offce", "Atlantic");
        assert_eq!(value, Some(200.0));
        assert_eq!(diag.status, MatchStatus::FuzzyType);
        assert_eq!(diag.matched_type.as_deref(), Some("Office"));
        assert!(diag.notes.contains("'Offce'"));
    }

    #[test]
    fn test_fuzzy_type_with_bad_region_is_no_match() {
        let (value, diag) = repo().lookup("Offce", "Mars");
        assert_eq!(value, None);
        assert_eq!(diag.status, MatchStatus::NoMatch);
    }

    #[test]
    fn test_drastically_different_type_is_no_match() {
        let (value, diag) = repo().lookup("Spaceport", "Atlantic");
        assert_eq!(value, None);
        assert_eq!(diag.status, MatchStatus::NoMatch);
        assert!(diag.notes.contains("'Spaceport'"));
        assert!(diag.notes.contains("'Atlantic'"));
    }

    #[test]
    fn test_region_from_other_sector_is_region_miss() {
        // Quebec only exists in the residential block
        let (value, diag) = repo().lookup("Office", "Quebec");
        assert_eq!(value, None);
        assert_eq!(diag.status, MatchStatus::TypeOkRegionMiss);
        assert!(diag.notes.contains("'Quebec'"));
        assert!(diag.matched_type.is_none());
    }

    #[test]
    fn test_blank_cell_is_region_miss() {
        let (value, diag) = repo().lookup("Single Detached", "Quebec");
        assert_eq!(value, None);
        assert_eq!(diag.status, MatchStatus::TypeOkRegionMiss);
    }

    #[test]
    fn test_every_parsed_pair_round_trips() {
        let repo = repo();
        for sector in [Sector::NonResidential, Sector::Residential] {
            for record in repo.table(sector).records() {
                let (value, diag) = repo.lookup(&record.building_type, &record.region);
                assert_eq!(value, Some(record.benchmark_eui));
                assert_eq!(diag.status, MatchStatus::Exact);
            }
        }
    }

    #[test]
    fn test_stricter_cutoff_disables_fuzzy() {
        let config = EngineConfig {
            fuzzy_cutoff: 0.95,
            ..EngineConfig::default()
        };
        let repo = BenchmarkRepository::from_sheet(&sample_sheet(), &config).unwrap();
        let (value, diag) = repo.lookup("Offce", "Atlantic");
        assert_eq!(value, None);
        assert_eq!(diag.status, MatchStatus::NoMatch);
    }
}
