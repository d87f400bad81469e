use serde::Serialize;

use crate::layout::bars::Rect;
use crate::math::scale::{BandScale, LinearScale};

pub const MALE_BAR_COLOR: &str = "steelblue";
pub const FEMALE_BAR_COLOR: &str = "#ee7989";

/// Headcounts of one age band in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBandCount {
    pub age: String,
    pub male: f64,
    pub female: f64,
}

/// An age band as a share of the whole year's population.
/// `male_percent` is negative so the male side extends left of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PyramidShare {
    pub age: String,
    pub male_count: f64,
    pub female_count: f64,
    pub male_percent: f64,
    pub female_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PyramidBar {
    pub share: PyramidShare,
    pub male: Rect,
    pub female: Rect,
}

/// Percent shares of the year total, oldest band first. A zero total gives zero shares.
pub fn pyramid_shares(bands: &[AgeBandCount]) -> Vec<PyramidShare> {
    let total: f64 = bands.iter().map(|b| b.male + b.female).sum();
    let percent = |v: f64| if total > 0.0 { v / total * 100.0 } else { 0.0 };

    bands
        .iter()
        .rev()
        .map(|b| PyramidShare {
            age: b.age.clone(),
            male_count: b.male,
            female_count: b.female,
            male_percent: -percent(b.male),
            female_percent: percent(b.female),
        })
        .collect()
}

/// Mirrored bars around `x(0)`. The x axis spans `[-extent_pct, extent_pct]`, bands run top to bottom.
pub fn pyramid_layout(shares: &[PyramidShare], width: f64, height: f64, extent_pct: f64) -> Vec<PyramidBar> {
    let x = LinearScale::new([-extent_pct, extent_pct], [0.0, width]);
    let y = BandScale::new(shares.iter().map(|s| s.age.clone()).collect(), [0.0, height], 0.1);
    let zero = x.map(0.0);
    let bandwidth = y.bandwidth();

    shares
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let top = y.position_at(i);
            let left = x.map(s.male_percent);
            PyramidBar {
                share: s.clone(),
                male: Rect { x: left, y: top, width: zero - left, height: bandwidth },
                female: Rect { x: zero, y: top, width: x.map(s.female_percent) - zero, height: bandwidth },
            }
        })
        .collect()
}
