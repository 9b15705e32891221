use serde::ser::Serializer;
use serde::Serialize;

use super::input::{
    BUILDING_NAME, BUILDING_TYPE, ELECTRICITY_KWH, EMAIL, FLOOR_AREA_M2, GAS_M3, REGION,
};
use crate::benchmark::MatchStatus;
use crate::scoring::Category;

pub const GAS_KWH: &str = "Gas_kWh";
pub const TOTAL_KWH: &str = "Total_kWh";
pub const USER_EUI: &str = "User_EUI_kWh_m2";
pub const BENCHMARK_EUI: &str = "Benchmark_EUI_kWh_m2";
pub const PERFORMANCE_RATIO: &str = "Performance_Ratio";
pub const CLARISCORE: &str = "ClariScore";
pub const CATEGORY: &str = "Category";
pub const CTA: &str = "CTA";
pub const MATCH_STATUS: &str = "Match_Status";
pub const MATCHED_TYPE: &str = "Matched_Type";
pub const MATCHED_REGION: &str = "Matched_Region";
pub const NOTES: &str = "Notes";

/// Output column order; diagnostics last. Extra input columns follow.
pub const PREFERRED_COLUMNS: [&str; 19] = [
    BUILDING_NAME,
    BUILDING_TYPE,
    REGION,
    ELECTRICITY_KWH,
    GAS_M3,
    GAS_KWH,
    TOTAL_KWH,
    FLOOR_AREA_M2,
    USER_EUI,
    BENCHMARK_EUI,
    PERFORMANCE_RATIO,
    CLARISCORE,
    CATEGORY,
    CTA,
    EMAIL,
    MATCH_STATUS,
    MATCHED_TYPE,
    MATCHED_REGION,
    NOTES,
];

/// One input row annotated with energy figures, rating and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    pub building_type: String,
    pub region: String,
    pub electricity_kwh: Option<f64>,
    pub gas_m3: Option<f64>,
    pub gas_kwh: Option<f64>,
    pub total_kwh: f64,
    pub floor_area_m2: Option<f64>,
    pub user_eui: Option<f64>,
    pub benchmark_eui: Option<f64>,
    pub performance_ratio: Option<f64>,
    pub score: u8,
    pub category: Category,
    pub call_to_action: String,
    pub email: String,
    pub match_status: MatchStatus,
    pub matched_type: Option<String>,
    pub matched_region: Option<String>,
    pub notes: String,
    #[serde(serialize_with = "serialize_pairs", skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl ScoredRecord {
    /// Text for an output column; `None` for columns this row doesn't carry.
    pub fn cell(&self, column: &str) -> Option<String> {
        let value = match column {
            BUILDING_NAME => self.building_name.clone().unwrap_or_default(),
            BUILDING_TYPE => self.building_type.clone(),
            REGION => self.region.clone(),
            ELECTRICITY_KWH => format_number(self.electricity_kwh),
            GAS_M3 => format_number(self.gas_m3),
            GAS_KWH => format_number(self.gas_kwh),
            TOTAL_KWH => format_number(Some(self.total_kwh)),
            FLOOR_AREA_M2 => format_number(self.floor_area_m2),
            USER_EUI => format_number(self.user_eui),
            BENCHMARK_EUI => format_number(self.benchmark_eui),
            PERFORMANCE_RATIO => format_number(self.performance_ratio),
            CLARISCORE => self.score.to_string(),
            CATEGORY => self.category.to_string(),
            CTA => self.call_to_action.clone(),
            EMAIL => self.email.clone(),
            MATCH_STATUS => self.match_status.to_string(),
            MATCHED_TYPE => self.matched_type.clone().unwrap_or_default(),
            MATCHED_REGION => self.matched_region.clone().unwrap_or_default(),
            NOTES => self.notes.clone(),
            other => return self.extra.iter().find(|(k, _)| k == other).map(|(_, v)| v.clone()),
        };
        Some(value)
    }
}

/// Scored rows plus the column order they are emitted in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTable {
    pub columns: Vec<String>,
    pub records: Vec<ScoredRecord>,
}

/// Per-status tallies over a scored table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub exact: usize,
    pub fuzzy_type: usize,
    pub type_ok_region_miss: usize,
    pub no_match: usize,
    pub mean_score: Option<f64>,
}

impl ScoredTable {
    /// Output columns: the preferred set present in this run, then every
    /// extra input column in input order, repeated headers included.
    pub fn output_columns(input_headers: &[String]) -> Vec<String> {
        let has_name = input_headers.iter().any(|h| h == BUILDING_NAME);
        let preferred = PREFERRED_COLUMNS
            .iter()
            .filter(|c| has_name || **c != BUILDING_NAME)
            .map(|c| c.to_string());
        let extras = input_headers
            .iter()
            .filter(|h| !PREFERRED_COLUMNS.contains(&h.as_str()))
            .cloned();
        preferred.chain(extras).collect()
    }

    /// Rows as text cells in column order.
    ///
    /// Extra columns are filled by position from each record's `extra`.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(|record| {
            let mut extras = record.extra.iter().map(|(_, value)| value.clone());
            self.columns
                .iter()
                .map(|column| {
                    if PREFERRED_COLUMNS.contains(&column.as_str()) {
                        record.cell(column).unwrap_or_default()
                    } else {
                        extras.next().unwrap_or_default()
                    }
                })
                .collect()
        })
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            rows: self.records.len(),
            ..Summary::default()
        };
        for record in &self.records {
            match record.match_status {
                MatchStatus::Exact => summary.exact += 1,
                MatchStatus::FuzzyType => summary.fuzzy_type += 1,
                MatchStatus::TypeOkRegionMiss => summary.type_ok_region_miss += 1,
                MatchStatus::NoMatch => summary.no_match += 1,
            }
        }
        if !self.records.is_empty() {
            let total: f64 = self.records.iter().map(|r| f64::from(r.score)).sum();
            summary.mean_score = Some(total / self.records.len() as f64);
        }
        summary
    }
}

/// Undefined numbers render as empty cells.
pub fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn serialize_pairs<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample_record() -> ScoredRecord {
        ScoredRecord {
            building_name: None,
            building_type: "Office".to_string(),
            region: "Atlantic".to_string(),
            electricity_kwh: Some(1000.0),
            gas_m3: None,
            gas_kwh: None,
            total_kwh: 1000.0,
            floor_area_m2: Some(0.0),
            user_eui: None,
            benchmark_eui: Some(200.0),
            performance_ratio: None,
            score: 20,
            category: Category::NeedsImprovement,
            call_to_action: "Call".to_string(),
            email: "a@b.c".to_string(),
            match_status: MatchStatus::Exact,
            matched_type: Some("Office".to_string()),
            matched_region: Some("Atlantic".to_string()),
            notes: String::new(),
            extra: vec![("Owner".to_string(), "Acme".to_string())],
        }
    }

    #[test]
    fn test_output_columns_without_name() {
        let headers = strings(&["Owner", "Building Type", "Region", "Electricity_kWh", "Gas_m3", "Floor_Area_m2", "Email", "Notes"]);
        let columns = ScoredTable::output_columns(&headers);
        assert_eq!(columns.len(), 19);
        assert_eq!(columns[0], "Building Type");
        assert_eq!(&columns[14..18], &["Match_Status", "Matched_Type", "Matched_Region", "Notes"]);
        assert_eq!(columns[18], "Owner");
    }

    #[test]
    fn test_output_columns_with_name_and_extras_in_order() {
        let headers = strings(&["Zeta", "Building Name", "Building Type", "Region", "Alpha", "Electricity_kWh", "Gas_m3", "Floor_Area_m2", "Email"]);
        let columns = ScoredTable::output_columns(&headers);
        assert_eq!(columns[0], "Building Name");
        assert_eq!(&columns[19..], &["Zeta", "Alpha"]);
    }

    #[test]
    fn test_repeated_extra_headers_keep_every_column() {
        let headers = strings(&["Owner", "Building Type", "Region", "Electricity_kWh", "Gas_m3", "Floor_Area_m2", "Email", "Owner"]);
        let columns = ScoredTable::output_columns(&headers);
        assert_eq!(columns.len(), 20);
        assert_eq!(&columns[18..], &["Owner", "Owner"]);

        let mut record = sample_record();
        record.extra = vec![
            ("Owner".to_string(), "Acme".to_string()),
            ("Owner".to_string(), "Beta".to_string()),
        ];
        let table = ScoredTable {
            columns,
            records: vec![record],
        };
        let rows: Vec<Vec<String>> = table.rows().collect();
        assert_eq!(&rows[0][18..], &["Acme", "Beta"]);
        assert_eq!(rows[0][0], "Office");
    }

    #[test]
    fn test_cells_render_undefined_as_blank() {
        let record = sample_record();
        assert_eq!(record.cell(USER_EUI).as_deref(), Some(""));
        assert_eq!(record.cell(ELECTRICITY_KWH).as_deref(), Some("1000"));
        assert_eq!(record.cell(CLARISCORE).as_deref(), Some("20"));
        assert_eq!(record.cell(CATEGORY).as_deref(), Some("Needs Improvement"));
        assert_eq!(record.cell(MATCH_STATUS).as_deref(), Some("exact"));
        assert_eq!(record.cell("Owner").as_deref(), Some("Acme"));
        assert_eq!(record.cell("Unknown"), None);
    }

    #[test]
    fn test_json_nests_extras_under_extra_key() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["extra"]["Owner"], "Acme");
        assert_eq!(json["category"], "Needs Improvement");
        assert_eq!(json["match_status"], "exact");
        assert!(json["user_eui"].is_null());
        assert!(json.get("building_name").is_none());
    }

    #[test]
    fn test_summary_counts() {
        let mut second = sample_record();
        second.match_status = MatchStatus::NoMatch;
        second.score = 60;
        let table = ScoredTable {
            columns: vec![],
            records: vec![sample_record(), second],
        };
        let summary = table.summary();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.exact, 1);
        assert_eq!(summary.no_match, 1);
        assert_eq!(summary.mean_score, Some(40.0));
    }
}
