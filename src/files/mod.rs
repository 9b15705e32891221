//! CSV collaborators around the scoring core: benchmark sheets and input
//! tables in, scored results, templates and reference listings out.

use anyhow::{anyhow, Context, Result};
use atomic_write_file::AtomicWriteFile;
use futures::StreamExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::benchmark::{ReferenceListing, Sheet};
use crate::pipeline::{InputTable, ScoredTable, TEMPLATE_COLUMNS};

/// Column headers of the reference listing file.
pub const REFERENCE_COLUMNS: [&str; 4] = [
    "NonRes Types",
    "Residential Types",
    "NonRes Regions",
    "Residential Regions",
];

/// Locate a benchmark sheet.
///
/// A directory holds one CSV per sheet, named `<sheet>.csv`; a file is used
/// as-is.
pub fn resolve_sheet_path(path: &Path, sheet_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(format!("{}.csv", sheet_name))
    } else {
        path.to_path_buf()
    }
}

/// Sibling path for the reference listing: `results.csv` -> `results_reference.csv`
pub fn reference_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out.with_file_name(format!("{}_reference.csv", stem))
}

/// Read every row of a CSV file as text cells. Rows may differ in width.
pub async fn read_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut reader = csv_async::AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(file);

    let mut rows = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        let record = record.with_context(|| format!("Failed to parse CSV in {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Load the raw benchmark sheet named `sheet_name` from `path`.
pub async fn read_sheet(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let sheet_path = resolve_sheet_path(path, sheet_name);
    let rows = read_grid(&sheet_path)
        .await
        .with_context(|| format!("Failed to read benchmark sheet '{}'", sheet_name))?;
    debug!(path = %sheet_path.display(), rows = rows.len(), "read benchmark sheet");
    Ok(Sheet::new(sheet_name, rows))
}

/// Load an input table; the first row is the header.
pub async fn read_input(path: &Path) -> Result<InputTable> {
    let grid = read_grid(path)
        .await
        .context("Failed to read input table")?;
    let table = InputTable::from_grid(grid);
    debug!(path = %path.display(), rows = table.rows.len(), "read input table");
    Ok(table)
}

/// Encode rows as CSV bytes.
pub async fn encode_csv<I>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv_async::AsyncWriterBuilder::new().create_writer(Vec::new());
    for row in rows {
        writer
            .write_record(&row)
            .await
            .context("Failed to encode CSV row")?;
    }
    writer
        .into_inner()
        .await
        .map_err(|_| anyhow!("Failed to flush CSV buffer"))
}

/// Write bytes so the file is never left half-written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

pub async fn write_results(path: &Path, table: &ScoredTable) -> Result<()> {
    let rows = std::iter::once(table.columns.clone()).chain(table.rows());
    let bytes = encode_csv(rows).await?;
    write_atomic(path, &bytes)
}

/// Write an empty input table carrying only the header row.
pub async fn write_template(path: &Path) -> Result<()> {
    let header = TEMPLATE_COLUMNS.iter().map(|c| c.to_string()).collect();
    let bytes = encode_csv([header]).await?;
    write_atomic(path, &bytes)
}

/// Write the four reference lists side by side, padded with blanks.
pub async fn write_reference(path: &Path, listing: &ReferenceListing) -> Result<()> {
    let bytes = encode_csv(reference_rows(listing)).await?;
    write_atomic(path, &bytes)
}

fn reference_rows(listing: &ReferenceListing) -> Vec<Vec<String>> {
    let columns = [
        &listing.non_residential_types,
        &listing.residential_types,
        &listing.non_residential_regions,
        &listing.residential_regions,
    ];
    let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut rows = Vec::with_capacity(height + 1);
    rows.push(REFERENCE_COLUMNS.iter().map(|c| c.to_string()).collect());
    for i in 0..height {
        rows.push(
            columns
                .iter()
                .map(|c| c.get(i).cloned().unwrap_or_default())
                .collect(),
        );
    }
    rows
}
