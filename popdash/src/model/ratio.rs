use serde::{Deserialize, Serialize};

use crate::error::RatioError;
use crate::model::records::GenderRecord;

/// Parts of females the male ratio is expressed against (`male : 100`).
pub const FEMALE_PARTS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShareMode {
    /// Headcounts as loaded.
    #[default]
    Absolute,
    /// Each category divided by the year's total.
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderSplit {
    pub male: u64,
    pub female: u64,
}

/// Split a headcount using a `male : 100 female` ratio.
///
/// Female is the remainder, so `male + female == total` always holds.
pub fn resolve_gender(total: u64, male_ratio: f64) -> Result<GenderSplit, RatioError> {
    if !(male_ratio.is_finite() && male_ratio > 0.0) {
        return Err(RatioError::InvalidMaleRatio(male_ratio));
    }
    let male = (total as f64 * male_ratio / (male_ratio + FEMALE_PARTS)).round() as u64;
    let male = male.min(total);
    Ok(GenderSplit { male, female: total - male })
}

pub fn resolve_age_shares(child: f64, adult: f64, elder: f64, mode: ShareMode) -> [f64; 3] {
    match mode {
        ShareMode::Absolute => [child, adult, elder],
        ShareMode::Proportional => {
            let sum = child + adult + elder;
            if sum == 0.0 {
                [0.0, 0.0, 0.0]
            } else {
                [child / sum, adult / sum, elder / sum]
            }
        }
    }
}

/// Male and female fractions of the record's total, `None` for an empty region-year.
pub fn gender_shares(record: &GenderRecord) -> Option<(f64, f64)> {
    let total = record.total();
    if total == 0 {
        return None;
    }
    let total = total as f64;
    Some((record.male as f64 / total, record.female as f64 / total))
}
