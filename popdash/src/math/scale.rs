use serde::Serialize;

use crate::config::ChartConfig;
use crate::model::ratio::ShareMode;
use crate::model::records::{Category, PopulationRecord};

/// Discrete positional scale; one equal-width band per domain entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale {
    domain: Vec<String>,
    range: [f64; 2],
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl BandScale {
    /// Same padding inside and outside, centred (align 0.5).
    pub fn new(domain: Vec<String>, range: [f64; 2], padding: f64) -> Self {
        let mut scale = Self {
            domain,
            range,
            padding_inner: padding,
            padding_outer: padding,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            start: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let [r0, r1] = self.range;
        self.step = (r1 - r0) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = r0 + (r1 - r0 - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the band at `index`.
    pub fn position_at(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain.iter().position(|d| d == key).map(|i| self.position_at(i))
    }

    pub fn center_at(&self, index: usize) -> f64 {
        self.position_at(index) + self.bandwidth / 2.0
    }
}

/// Continuous scale `domain -> range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, x: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        // Degenerate domain maps everything to the middle of the range.
        let t = if span != 0.0 { (x - d0) / span } else { 0.5 };
        r0 * (1.0 - t) + r1 * t
    }

    pub fn invert(&self, y: f64) -> f64 {
        LinearScale::new(self.range, self.domain).map(y)
    }

    pub fn upper(&self) -> f64 {
        self.domain[1]
    }
}

pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Child => "#abdda4",
        Category::Adult => "#fee08b",
        Category::Elder => "rgba(244, 109, 67, 0.5)",
    }
}

pub const MALE_LINE_COLOR: &str = "#3288bd";
pub const FEMALE_LINE_COLOR: &str = "#e72c41";

/// Largest single-year child+adult+elder across every loaded province.
pub fn global_stack_max<'a>(records: impl IntoIterator<Item = &'a PopulationRecord>) -> f64 {
    records.into_iter().map(PopulationRecord::total).fold(0.0, f64::max)
}

/// Upper bound of the left axis. Depends on the value mode only, never on the province.
pub fn left_upper(mode: ShareMode, global_max: f64) -> f64 {
    match mode {
        ShareMode::Absolute => global_max,
        ShareMode::Proportional => 1.0,
    }
}

/// The scales of one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSet {
    pub x: BandScale,
    pub y_left: LinearScale,
    pub y_right: LinearScale,
}

impl ScaleSet {
    pub fn compute(years: Vec<String>, left_upper: f64, width: f64, height: f64, cfg: &ChartConfig) -> Self {
        Self {
            x: BandScale::new(years, [0.0, width], cfg.band_padding),
            y_left: LinearScale::new([0.0, left_upper], [height, 0.0]),
            y_right: LinearScale::new(cfg.ratio_domain, [height * cfg.ratio_band, 0.0]),
        }
    }
}
