use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::layout::pyramid::AgeBandCount;

#[derive(Debug, Deserialize)]
struct PyramidRow {
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "M")]
    male: f64,
    #[serde(rename = "F")]
    female: f64,
}

/// Load one year of the national pyramid from a CSV with columns `Age,M,F`, youngest band first.
pub fn load_pyramid_csv(path: impl AsRef<Path>) -> anyhow::Result<Vec<AgeBandCount>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open pyramid CSV: {}", path.display()))?;
    read_pyramid(file).with_context(|| format!("Failed to parse pyramid CSV: {}", path.display()))
}

pub fn read_pyramid<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<AgeBandCount>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for result in rdr.deserialize::<PyramidRow>() {
        let row = result?;
        anyhow::ensure!(
            row.male >= 0.0 && row.female >= 0.0,
            "negative headcount in age band {}",
            row.age
        );
        out.push(AgeBandCount { age: row.age, male: row.male, female: row.female });
    }
    Ok(out)
}
