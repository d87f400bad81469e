use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::io::table::normalize_year;
use crate::model::records::PopulationRecord;

#[derive(Debug, Deserialize)]
struct NationalRow {
    year: String,
    child: f64,
    adult: f64,
    elder: f64,
    total: f64,
}

/// Load the national-average table: columns `year,child,adult,elder,total`, shares of `total`.
/// Records are labelled with `label` so they sit alongside the provinces.
pub fn load_national_csv(path: impl AsRef<Path>, label: &str) -> anyhow::Result<Vec<PopulationRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open national CSV: {}", path.display()))?;
    read_national(file, label).with_context(|| format!("Failed to parse national CSV: {}", path.display()))
}

pub fn read_national<R: std::io::Read>(reader: R, label: &str) -> anyhow::Result<Vec<PopulationRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for result in rdr.deserialize::<NationalRow>() {
        let row = result?;
        anyhow::ensure!(row.total >= 0.0, "negative national total for year {}", row.year);
        out.push(PopulationRecord {
            province: label.to_string(),
            year: normalize_year(&row.year),
            child: row.child * row.total,
            adult: row.adult * row.total,
            elder: row.elder * row.total,
        });
    }
    Ok(out)
}
