use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::error::TableError;

/// Administrative suffixes removed when keying regions. Longer forms first.
const REGION_SUFFIXES: [&str; 6] = ["壮族自治区", "回族自治区", "维吾尔自治区", "自治区", "省", "市"];

/// A region-by-year table: first column is the region label, the rest are years.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub name: String,
    pub region_header: String,
    pub years: Vec<String>,
    pub rows: Vec<TableRow>,
    by_key: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub region: String,
    pub key: String,
    /// One per year column; `None` where the cell is empty or not a number.
    pub cells: Vec<Option<f64>>,
}

impl WideTable {
    pub fn from_reader<R: std::io::Read>(name: &str, reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut columns = headers.iter();
        let region_header = columns
            .next()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .ok_or(TableError::MissingHeader)?;
        let years: Vec<String> = columns.map(normalize_year).collect();
        if years.is_empty() {
            return Err(TableError::NoYearColumns);
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let region = match record.get(0) {
                Some(r) if !r.is_empty() => r.to_string(),
                _ => continue,
            };
            let cells = (0..years.len())
                .map(|i| record.get(i + 1).and_then(parse_cell))
                .collect();
            rows.push(TableRow { key: normalize_region(&region), region, cells });
        }
        Self::from_rows(name, region_header, years, rows)
    }

    /// Fails when two rows normalize to the same region key.
    pub fn from_rows(
        name: &str,
        region_header: String,
        years: Vec<String>,
        rows: Vec<TableRow>,
    ) -> Result<Self, TableError> {
        let mut by_key: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if let Some(&first) = by_key.get(&row.key) {
                let first = &rows[first];
                return Err(TableError::DuplicateRegion {
                    key: row.key.clone(),
                    first: first.region.clone(),
                    second: row.region.clone(),
                });
            }
            by_key.insert(row.key.clone(), i);
        }
        Ok(Self { name: name.to_string(), region_header, years, rows, by_key })
    }

    pub fn year_index(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    /// Row for a region, matched on the normalized label.
    pub fn row(&self, region: &str) -> Option<&TableRow> {
        self.by_key.get(&normalize_region(region)).map(|&i| &self.rows[i])
    }
}

impl TableRow {
    pub fn new(region: &str, cells: Vec<Option<f64>>) -> Self {
        Self { region: region.to_string(), key: normalize_region(region), cells }
    }
}

pub fn load_wide_table_csv(path: impl AsRef<Path>) -> anyhow::Result<WideTable> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open table CSV: {}", path.display()))?;
    WideTable::from_reader(&name, file)
        .with_context(|| format!("Failed to parse table CSV: {}", path.display()))
}

/// `2022年` and `2022` both key as `2022`.
pub fn normalize_year(label: &str) -> String {
    label.trim().trim_end_matches('年').to_string()
}

pub fn normalize_region(name: &str) -> String {
    let mut key = name.trim().to_string();
    for suffix in REGION_SUFFIXES {
        key = key.replace(suffix, "");
    }
    key
}

pub fn parse_cell(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
