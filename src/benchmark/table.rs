use std::collections::{BTreeSet, HashMap};

use super::types::{BenchmarkRecord, Sector};
use crate::text::normalize;

/// Long-form benchmark records for one sector, indexed by normalized keys.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    sector: Sector,
    records: Vec<BenchmarkRecord>,
    // normalized type -> normalized region -> first record in melt order
    index: HashMap<String, HashMap<String, usize>>,
    normalized_types: BTreeSet<String>,
    building_types: Vec<String>,
    regions: Vec<String>,
}

impl BenchmarkTable {
    /// Build a table, excluding `aggregate_region` from the offered regions.
    pub fn new(sector: Sector, records: Vec<BenchmarkRecord>, aggregate_region: &str) -> Self {
        let aggregate = normalize(Some(aggregate_region));

        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut normalized_types = BTreeSet::new();
        let mut building_types = BTreeSet::new();
        let mut regions = BTreeSet::new();

        for (i, record) in records.iter().enumerate() {
            index
                .entry(record.normalized_type.clone())
                .or_default()
                .entry(record.normalized_region.clone())
                .or_insert(i);
            normalized_types.insert(record.normalized_type.clone());
            building_types.insert(record.building_type.clone());
            if record.normalized_region != aggregate {
                regions.insert(record.region.clone());
            }
        }

        Self {
            sector,
            records,
            index,
            normalized_types,
            building_types: building_types.into_iter().collect(),
            regions: regions.into_iter().collect(),
        }
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for already-normalized keys.
    pub fn get(&self, normalized_type: &str, normalized_region: &str) -> Option<&BenchmarkRecord> {
        self.index
            .get(normalized_type)
            .and_then(|regions| regions.get(normalized_region))
            .map(|&i| &self.records[i])
    }

    pub fn contains_type(&self, normalized_type: &str) -> bool {
        self.normalized_types.contains(normalized_type)
    }

    /// Distinct normalized building types, sorted.
    pub fn normalized_types(&self) -> impl Iterator<Item = &str> {
        self.normalized_types.iter().map(String::as_str)
    }

    /// Distinct building types as written in the source, sorted.
    pub fn building_types(&self) -> &[String] {
        &self.building_types
    }

    /// Regions users may select, sorted; never includes the aggregate.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BenchmarkTable {
        BenchmarkTable::new(
            Sector::NonResidential,
            vec![
                BenchmarkRecord::new("Office", "Canada", 190.0),
                BenchmarkRecord::new("Retail", "Canada", 250.0),
                BenchmarkRecord::new("Office", "Atlantic", 200.0),
                BenchmarkRecord::new("OFFICE", "atlantic", 999.0),
                BenchmarkRecord::new("Office", "Great Lakes", 180.0),
            ],
            "Canada",
        )
    }

    #[test]
    fn test_get_uses_normalized_keys() {
        let table = sample();
        let record = table.get("office", "great lakes").unwrap();
        assert_eq!(record.benchmark_eui, 180.0);
        assert!(table.get("Office", "Great Lakes").is_none());
    }

    #[test]
    fn test_duplicate_key_keeps_first_record() {
        let table = sample();
        assert_eq!(table.get("office", "atlantic").unwrap().benchmark_eui, 200.0);
    }

    #[test]
    fn test_aggregate_region_queryable_but_not_offered() {
        let table = sample();
        assert!(table.get("retail", "canada").is_some());
        assert_eq!(table.regions(), &["Atlantic", "Great Lakes", "atlantic"]);
    }

    #[test]
    fn test_vocabularies() {
        let table = sample();
        assert_eq!(table.building_types(), &["OFFICE", "Office", "Retail"]);
        assert_eq!(table.normalized_types().collect::<Vec<_>>(), vec!["office", "retail"]);
        assert!(table.contains_type("retail"));
        assert!(!table.contains_type("Retail"));
        assert_eq!(table.len(), 5);
        assert_eq!(table.sector(), Sector::NonResidential);
    }
}
