pub mod compute;
pub mod input;
pub mod record;

pub use compute::{energy_use, performance_ratio, ComputePipeline, EnergyUse, GAS_KWH_PER_M3};
pub use input::{parse_number, BuildingRecord, InputTable, REQUIRED_COLUMNS, TEMPLATE_COLUMNS};
pub use record::{format_number, ScoredRecord, ScoredTable, Summary, PREFERRED_COLUMNS};
