use crate::error::{Error, Result};

pub const BUILDING_NAME: &str = "Building Name";
pub const BUILDING_TYPE: &str = "Building Type";
pub const REGION: &str = "Region";
pub const ELECTRICITY_KWH: &str = "Electricity_kWh";
pub const GAS_M3: &str = "Gas_m3";
pub const FLOOR_AREA_M2: &str = "Floor_Area_m2";
pub const EMAIL: &str = "Email";

/// Columns every input table must carry, matched case- and name-exact.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    BUILDING_TYPE,
    REGION,
    ELECTRICITY_KWH,
    GAS_M3,
    FLOOR_AREA_M2,
    EMAIL,
];

/// Header row of a blank input template.
pub const TEMPLATE_COLUMNS: [&str; 7] = [
    BUILDING_NAME,
    BUILDING_TYPE,
    REGION,
    ELECTRICITY_KWH,
    GAS_M3,
    FLOOR_AREA_M2,
    EMAIL,
];

/// Tabular input: one header row plus data rows of text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One input row with its measurements coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingRecord {
    pub name: Option<String>,
    pub building_type: String,
    pub region: String,
    pub electricity_kwh: Option<f64>,
    pub gas_m3: Option<f64>,
    pub floor_area_m2: Option<f64>,
    pub email: String,
    /// Cells of columns outside the known set, in input order
    pub extra: Vec<(String, String)>,
}

impl InputTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Split a raw grid into header row and data rows.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let headers = grid.remove(0);
        Self::new(headers, grid)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Required columns absent from the header row, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_columns();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns(missing))
        }
    }

    /// Coerce every row after checking the required columns.
    ///
    /// `known_columns` lists headers that are not carried over as extras.
    pub fn records(&self, known_columns: &[&str]) -> Result<Vec<BuildingRecord>> {
        self.validate()?;

        let index = |name: &str| self.column_index(name);
        let (type_col, region_col, email_col) = (index(BUILDING_TYPE), index(REGION), index(EMAIL));
        let (elec_col, gas_col, area_col) = (index(ELECTRICITY_KWH), index(GAS_M3), index(FLOOR_AREA_M2));
        let name_col = index(BUILDING_NAME);

        let extra_cols: Vec<(usize, &str)> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !known_columns.contains(&h.as_str()))
            .map(|(i, h)| (i, h.as_str()))
            .collect();

        let records = self
            .rows
            .iter()
            .map(|row| {
                let text = |col: Option<usize>| {
                    col.and_then(|c| row.get(c)).cloned().unwrap_or_default()
                };
                let number = |col: Option<usize>| parse_number(col.and_then(|c| row.get(c)).map(String::as_str));

                BuildingRecord {
                    name: name_col.map(|c| row.get(c).cloned().unwrap_or_default()),
                    building_type: text(type_col),
                    region: text(region_col),
                    electricity_kwh: number(elec_col),
                    gas_m3: number(gas_col),
                    floor_area_m2: number(area_col),
                    email: text(email_col),
                    extra: extra_cols
                        .iter()
                        .map(|&(c, h)| (h.to_string(), row.get(c).cloned().unwrap_or_default()))
                        .collect(),
                }
            })
            .collect();

        Ok(records)
    }
}

/// Lenient numeric coercion: blank, unparsable and non-finite become `None`.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
