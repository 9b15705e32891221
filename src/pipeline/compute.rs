use tracing::{debug, info};

use super::input::{BuildingRecord, InputTable};
use super::record::{ScoredRecord, ScoredTable, PREFERRED_COLUMNS};
use crate::benchmark::BenchmarkRepository;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::scoring::rate;

/// Natural gas energy content, kWh per cubic metre.
pub const GAS_KWH_PER_M3: f64 = 10.35;

/// Derived energy figures for one building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyUse {
    pub gas_kwh: Option<f64>,
    pub total_kwh: f64,
    pub user_eui: Option<f64>,
}

/// Convert gas to kWh, sum energy and divide by floor area.
///
/// Missing inputs count as zero in the sum. EUI is undefined when the floor
/// area is missing or zero.
pub fn energy_use(
    electricity_kwh: Option<f64>,
    gas_m3: Option<f64>,
    floor_area_m2: Option<f64>,
) -> EnergyUse {
    let gas_kwh = gas_m3.map(|m3| m3 * GAS_KWH_PER_M3);
    let total_kwh = electricity_kwh.unwrap_or(0.0) + gas_kwh.unwrap_or(0.0);
    let user_eui = floor_area_m2
        .filter(|area| *area != 0.0)
        .map(|area| total_kwh / area);
    EnergyUse {
        gas_kwh,
        total_kwh,
        user_eui,
    }
}

/// Benchmark EUI over measured EUI; above 1 beats the benchmark.
pub fn performance_ratio(benchmark_eui: Option<f64>, user_eui: Option<f64>) -> Option<f64> {
    match (benchmark_eui, user_eui) {
        (Some(benchmark), Some(user)) if user != 0.0 => Some(benchmark / user),
        _ => None,
    }
}

/// Scores batches of buildings against a shared benchmark repository.
#[derive(Debug, Clone)]
pub struct ComputePipeline<'a> {
    repository: &'a BenchmarkRepository,
    call_to_action: String,
}

impl<'a> ComputePipeline<'a> {
    pub fn new(repository: &'a BenchmarkRepository, config: &EngineConfig) -> Self {
        Self {
            repository,
            call_to_action: config.call_to_action.clone(),
        }
    }

    /// Score every row of `input`, preserving order.
    ///
    /// Fails only when required columns are missing; every row otherwise
    /// yields exactly one scored record.
    pub fn compute(&self, input: &InputTable) -> Result<ScoredTable> {
        let buildings = input.records(&PREFERRED_COLUMNS)?;
        let records: Vec<ScoredRecord> = buildings
            .into_iter()
            .enumerate()
            .map(|(row, building)| {
                let scored = self.score_building(building);
                if !scored.match_status.is_resolved() {
                    debug!(row, status = %scored.match_status, notes = %scored.notes, "benchmark unresolved");
                }
                scored
            })
            .collect();

        let table = ScoredTable {
            columns: ScoredTable::output_columns(&input.headers),
            records,
        };

        let summary = table.summary();
        info!(
            rows = summary.rows,
            exact = summary.exact,
            fuzzy_type = summary.fuzzy_type,
            region_miss = summary.type_ok_region_miss,
            no_match = summary.no_match,
            "scored buildings"
        );
        Ok(table)
    }

    pub fn score_building(&self, building: BuildingRecord) -> ScoredRecord {
        let energy = energy_use(
            building.electricity_kwh,
            building.gas_m3,
            building.floor_area_m2,
        );
        let (benchmark_eui, diagnostic) = self
            .repository
            .lookup(&building.building_type, &building.region);
        let ratio = performance_ratio(benchmark_eui, energy.user_eui);
        let rating = rate(ratio);

        ScoredRecord {
            building_name: building.name,
            building_type: building.building_type,
            region: building.region,
            electricity_kwh: building.electricity_kwh,
            gas_m3: building.gas_m3,
            gas_kwh: energy.gas_kwh,
            total_kwh: energy.total_kwh,
            floor_area_m2: building.floor_area_m2,
            user_eui: energy.user_eui,
            benchmark_eui,
            performance_ratio: ratio,
            score: rating.score,
            category: rating.category,
            call_to_action: self.call_to_action.clone(),
            email: building.email,
            match_status: diagnostic.status,
            matched_type: diagnostic.matched_type,
            matched_region: diagnostic.matched_region,
            notes: diagnostic.notes,
            extra: building.extra,
        }
    }
}
