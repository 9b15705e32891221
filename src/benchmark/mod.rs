pub mod repository;
pub mod sheet;
pub mod table;
pub mod types;

pub use repository::{BenchmarkRepository, ReferenceListing};
pub use sheet::{melt, Sheet};
pub use table::BenchmarkTable;
pub use types::{BenchmarkRecord, Diagnostic, MatchStatus, Sector};
