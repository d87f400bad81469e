use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::config::ChartConfig;
use crate::io::merge::{merge_age_tables, merge_gender, AgeTables, MissingCell, SkippedRecord};
use crate::io::national::load_national_csv;
use crate::io::table::{load_wide_table_csv, normalize_region};
use crate::model::records::{GenderRecord, PopulationRecord};

pub const CHILD_CSV: &str = "child.csv";
pub const ADULT_CSV: &str = "adult.csv";
pub const ELDER_CSV: &str = "elder.csv";
pub const TOTAL_CSV: &str = "allpeople.csv";
pub const MALE_FEMALE_CSV: &str = "malefemale.csv";
pub const NATIONAL_CSV: &str = "national.csv";

/// Everything the age-structure panel needs, joined and ready.
#[derive(Debug, Clone)]
pub struct PanelData {
    pub population: Vec<PopulationRecord>,
    pub gender: Vec<GenderRecord>,
    pub missing: Vec<MissingCell>,
    pub skipped: Vec<SkippedRecord>,
}

/// Load and join every table in `dir`. Any failing table fails the whole load.
///
/// `national.csv` is optional; when present its rows are appended under
/// `cfg.national_label` unless the age tables already carry that region.
pub fn load_sources(dir: impl AsRef<Path>, cfg: &ChartConfig) -> anyhow::Result<PanelData> {
    let dir = dir.as_ref();
    let child = load_wide_table_csv(dir.join(CHILD_CSV))?;
    let adult = load_wide_table_csv(dir.join(ADULT_CSV))?;
    let elder = load_wide_table_csv(dir.join(ELDER_CSV))?;
    let total = load_wide_table_csv(dir.join(TOTAL_CSV))?;
    let ratio = load_wide_table_csv(dir.join(MALE_FEMALE_CSV))?;

    let tables = AgeTables {
        child: &child,
        adult: &adult,
        elder: &elder,
        total: Some(&total),
        kind: cfg.age_values,
    };
    let ages = merge_age_tables(&tables, cfg.join)
        .with_context(|| format!("Failed to join age tables in {}", dir.display()))?;
    let genders = merge_gender(&total, &ratio);

    let mut population = ages.records;
    let national_path = dir.join(NATIONAL_CSV);
    let national = normalize_region(&cfg.national_label);
    if national_path.exists() && !population.iter().any(|r| normalize_region(&r.province) == national) {
        population.extend(load_national_csv(&national_path, &cfg.national_label)?);
    }

    info!(
        dir = %dir.display(),
        population = population.len(),
        gender = genders.records.len(),
        "panel data loaded"
    );

    Ok(PanelData {
        population,
        gender: genders.records,
        missing: ages.missing,
        skipped: genders.skipped,
    })
}
