use serde::{Deserialize, Serialize};

pub const DEFAULT_SHEET_NAME: &str = "Types (2)";
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.82;
pub const DEFAULT_AGGREGATE_REGION: &str = "Canada";
pub const DEFAULT_CALL_TO_ACTION: &str = "Push this building to QuickModel for deeper analysis";

/// Engine configuration.
///
/// Every key is optional; missing keys fall back to the defaults above.
///
/// Example YAML:
/// ```yaml
/// sheet_name: "Types (2)"
/// fuzzy_cutoff: 0.82
/// aggregate_region: Canada
/// call_to_action: "Push this building to QuickModel for deeper analysis"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Benchmark worksheet to read
    pub sheet_name: String,

    /// Minimum similarity (0-1] for substituting a misspelled building type
    pub fuzzy_cutoff: f64,

    /// Nationwide aggregate region; marks block headers in the benchmark
    /// sheet and is hidden from the selectable region lists
    pub aggregate_region: String,

    /// Constant call-to-action attached to every scored row
    pub call_to_action: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            aggregate_region: DEFAULT_AGGREGATE_REGION.to_string(),
            call_to_action: DEFAULT_CALL_TO_ACTION.to_string(),
        }
    }
}
