use std::fmt::Write;

use serde::Serialize;

use crate::math::scale::{ScaleSet, FEMALE_LINE_COLOR, MALE_LINE_COLOR};
use crate::model::ratio::gender_shares;
use crate::model::records::GenderRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub year: String,
    pub share: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLine {
    pub sex: Sex,
    pub color: &'static str,
    pub points: Vec<OverlayPoint>,
}

impl OverlayLine {
    /// SVG path data, `M x,y L x,y ...`.
    pub fn path_d(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.3},{:.3}", cmd, p.x, p.y);
        }
        d
    }
}

/// Male and female share lines at band centres, plotted against the right axis.
///
/// Years outside the band domain or with a zero total are left out.
pub fn ratio_overlay(region_records: &[&GenderRecord], scales: &ScaleSet) -> [OverlayLine; 2] {
    let mut male = Vec::new();
    let mut female = Vec::new();
    for (i, year) in scales.x.domain().iter().enumerate() {
        let Some(record) = region_records.iter().find(|r| &r.year == year) else {
            continue;
        };
        let Some((m, f)) = gender_shares(record) else {
            continue;
        };
        let x = scales.x.center_at(i);
        male.push(OverlayPoint { year: year.clone(), share: m, x, y: scales.y_right.map(m) });
        female.push(OverlayPoint { year: year.clone(), share: f, x, y: scales.y_right.map(f) });
    }
    [
        OverlayLine { sex: Sex::Male, color: MALE_LINE_COLOR, points: male },
        OverlayLine { sex: Sex::Female, color: FEMALE_LINE_COLOR, points: female },
    ]
}
