use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DataJoinError;
use crate::io::table::{TableRow, WideTable};
use crate::model::ratio::resolve_gender;
use crate::model::records::{GenderRecord, PopulationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Match rows on the normalized region label.
    #[default]
    Keyed,
    /// Match rows by position; labels must still agree.
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeValueKind {
    /// Cells are shares in [0, 1] of the total-population table.
    #[default]
    Proportion,
    /// Cells are headcounts.
    Absolute,
}

pub struct AgeTables<'a> {
    pub child: &'a WideTable,
    pub adult: &'a WideTable,
    pub elder: &'a WideTable,
    /// Required for `AgeValueKind::Proportion`.
    pub total: Option<&'a WideTable>,
    pub kind: AgeValueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCell {
    pub table: String,
    pub region: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoRatioRow,
    MissingRatio,
    MissingTotal,
    InvalidTotal,
    InvalidRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub region: String,
    pub year: String,
    pub reason: SkipReason,
}

/// Joined records plus everything that was left out on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport<T> {
    pub records: Vec<T>,
    pub missing: Vec<MissingCell>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> MergeReport<T> {
    fn new() -> Self {
        Self { records: Vec::new(), missing: Vec::new(), skipped: Vec::new() }
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.skipped.is_empty()
    }
}

/// Secondary table resolved against the primary: matching row and column map.
struct Aligned<'a> {
    table: &'a WideTable,
    columns: Vec<usize>,
}

impl<'a> Aligned<'a> {
    fn new(table: &'a WideTable, primary: &WideTable) -> Result<Self, DataJoinError> {
        let columns = primary
            .years
            .iter()
            .map(|year| {
                table.year_index(year).ok_or_else(|| DataJoinError::MissingYear {
                    table: table.name.clone(),
                    year: year.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let extra: Vec<String> = table
            .years
            .iter()
            .filter(|year| primary.year_index(year).is_none())
            .cloned()
            .collect();
        if !extra.is_empty() {
            return Err(DataJoinError::YearSetMismatch { table: table.name.clone(), extra });
        }
        Ok(Self { table, columns })
    }

    fn row(&self, idx: usize, primary: &TableRow, strategy: JoinStrategy) -> Result<&'a TableRow, DataJoinError> {
        let table: &'a WideTable = self.table;
        match strategy {
            JoinStrategy::Keyed => table.row(&primary.region).ok_or_else(|| DataJoinError::MissingRegion {
                table: table.name.clone(),
                region: primary.region.clone(),
            }),
            JoinStrategy::Positional => {
                let row = &table.rows[idx];
                if row.key != primary.key {
                    return Err(DataJoinError::RegionMismatch {
                        table: table.name.clone(),
                        row: idx,
                        expected: primary.region.clone(),
                        found: row.region.clone(),
                    });
                }
                Ok(row)
            }
        }
    }

    fn cell(&self, row: &TableRow, year_idx: usize) -> Option<f64> {
        row.cells.get(self.columns[year_idx]).copied().flatten()
    }
}

/// Positional join of the age tables, kept for row-order-identical sources.
pub fn merge_by_index(tables: &AgeTables<'_>) -> Result<MergeReport<PopulationRecord>, DataJoinError> {
    merge_age_tables(tables, JoinStrategy::Positional)
}

/// Keyed join of the age tables on the region label.
pub fn merge_by_key(tables: &AgeTables<'_>) -> Result<MergeReport<PopulationRecord>, DataJoinError> {
    merge_age_tables(tables, JoinStrategy::Keyed)
}

pub fn merge_age_tables(
    tables: &AgeTables<'_>,
    strategy: JoinStrategy,
) -> Result<MergeReport<PopulationRecord>, DataJoinError> {
    let primary = tables.child;
    let total = match tables.kind {
        AgeValueKind::Proportion => Some(tables.total.ok_or_else(|| DataJoinError::MissingTable("total".into()))?),
        AgeValueKind::Absolute => None,
    };

    let mut secondaries = vec![tables.adult, tables.elder];
    secondaries.extend(total);
    if strategy == JoinStrategy::Positional {
        for t in &secondaries {
            if t.rows.len() != primary.rows.len() {
                return Err(DataJoinError::RowCountMismatch {
                    table: t.name.clone(),
                    expected: primary.rows.len(),
                    actual: t.rows.len(),
                });
            }
        }
    }
    let aligned = secondaries
        .into_iter()
        .map(|t| Aligned::new(t, primary))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = MergeReport::new();
    for (idx, row) in primary.rows.iter().enumerate() {
        let matched = aligned
            .iter()
            .map(|a| a.row(idx, row, strategy))
            .collect::<Result<Vec<_>, _>>()?;

        for (j, year) in primary.years.iter().enumerate() {
            let mut cells = Vec::with_capacity(1 + aligned.len());
            cells.push((primary.name.as_str(), row.cells.get(j).copied().flatten()));
            for (a, r) in aligned.iter().zip(&matched) {
                cells.push((a.table.name.as_str(), a.cell(r, j)));
            }

            let mut values = Vec::with_capacity(cells.len());
            for (table, cell) in &cells {
                match cell {
                    Some(v) => values.push(*v),
                    None => report.missing.push(MissingCell {
                        table: table.to_string(),
                        region: row.region.clone(),
                        year: year.clone(),
                    }),
                }
            }
            if values.len() != cells.len() {
                debug!(region = %row.region, year = %year, "dropping record with missing cells");
                continue;
            }

            let scale = if total.is_some() { values[3] } else { 1.0 };
            report.records.push(PopulationRecord {
                province: row.region.clone(),
                year: year.clone(),
                child: values[0] * scale,
                adult: values[1] * scale,
                elder: values[2] * scale,
            });
        }
    }

    if !report.missing.is_empty() {
        warn!(table = %primary.name, missing = report.missing.len(), "age tables have missing cells");
    }
    Ok(report)
}

/// Derive male/female headcounts from a total table and a `male : 100` ratio table.
///
/// Region-years without a usable counterpart are skipped, not errored.
pub fn merge_gender(total: &WideTable, ratio: &WideTable) -> MergeReport<GenderRecord> {
    let mut report = MergeReport::new();
    for row in &total.rows {
        let ratio_row = ratio.row(&row.region);
        for (j, year) in total.years.iter().enumerate() {
            let skip = |reason| SkippedRecord { region: row.region.clone(), year: year.clone(), reason };
            let Some(ratio_row) = ratio_row else {
                report.skipped.push(skip(SkipReason::NoRatioRow));
                continue;
            };
            let Some(count) = row.cells.get(j).copied().flatten() else {
                report.skipped.push(skip(SkipReason::MissingTotal));
                continue;
            };
            if count < 0.0 {
                report.skipped.push(skip(SkipReason::InvalidTotal));
                continue;
            }
            let male_ratio = ratio
                .year_index(year)
                .and_then(|k| ratio_row.cells.get(k).copied().flatten());
            let Some(male_ratio) = male_ratio else {
                report.skipped.push(skip(SkipReason::MissingRatio));
                continue;
            };
            // Totals are whole people; fractional input truncates.
            match resolve_gender(count.trunc() as u64, male_ratio) {
                Ok(split) => report.records.push(GenderRecord {
                    region: row.region.clone(),
                    year: year.clone(),
                    male: split.male,
                    female: split.female,
                }),
                Err(_) => report.skipped.push(skip(SkipReason::InvalidRatio)),
            }
        }
    }

    if !report.skipped.is_empty() {
        warn!(table = %ratio.name, skipped = report.skipped.len(), "gender records skipped");
    }
    report
}
