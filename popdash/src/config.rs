use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::io::merge::{AgeValueKind, JoinStrategy};
use crate::model::ratio::ShareMode;
use crate::model::selection::Layout;

/// What to do when stacked is requested while the national aggregate is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NationalStackedPolicy {
    /// Leave the chart as it is.
    #[default]
    Ignore,
    /// Render the grouped layout instead.
    FallbackToGrouped,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 10.0, right: 100.0, bottom: 17.0, left: 60.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub default_province: String,
    pub default_layout: Layout,
    pub national_label: String,
    pub national_stacked: NationalStackedPolicy,

    // Values plotted in each layout
    pub stacked_values: ShareMode,
    pub grouped_values: ShareMode,

    // Loading
    pub join: JoinStrategy,
    pub age_values: AgeValueKind,

    // Geometry (pixels)
    pub margins: Margins,
    pub container_width: f64,
    pub container_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Vertical space reserved for the layout controls.
    pub controls_height: f64,
    pub band_padding: f64,
    pub ratio_domain: [f64; 2],
    /// Fraction of the plot height, from the top, used by the ratio overlay.
    pub ratio_band: f64,

    // Transitions (milliseconds)
    pub phase_ms: f64,
    pub stagger_ms: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_province: "北京市".to_string(),
            default_layout: Layout::Stacked,
            national_label: "全国".to_string(),
            national_stacked: NationalStackedPolicy::Ignore,
            stacked_values: ShareMode::Absolute,
            grouped_values: ShareMode::Proportional,
            join: JoinStrategy::Keyed,
            age_values: AgeValueKind::Proportion,
            margins: Margins::default(),
            container_width: 800.0,
            container_height: 400.0,
            min_width: 300.0,
            min_height: 200.0,
            controls_height: 40.0,
            band_padding: 0.1,
            ratio_domain: [0.45, 0.55],
            ratio_band: 0.4,
            phase_ms: 500.0,
            stagger_ms: 20.0,
        }
    }
}

impl ChartConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart config: {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse chart config: {}", path.display()))?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.default_province.trim().is_empty(), "default_province must not be empty");
        anyhow::ensure!(self.min_width > 0.0 && self.min_height > 0.0, "min_width and min_height must be > 0");
        anyhow::ensure!((0.0..1.0).contains(&self.band_padding), "band_padding must be in [0, 1)");
        anyhow::ensure!(self.ratio_domain[0] < self.ratio_domain[1], "ratio_domain must be increasing");
        anyhow::ensure!(self.ratio_band > 0.0 && self.ratio_band <= 1.0, "ratio_band must be in (0, 1]");
        anyhow::ensure!(self.phase_ms >= 0.0 && self.stagger_ms >= 0.0, "phase_ms and stagger_ms must be >= 0");
        Ok(())
    }

    pub fn share_mode(&self, layout: Layout) -> ShareMode {
        match layout {
            Layout::Stacked => self.stacked_values,
            Layout::Grouped => self.grouped_values,
        }
    }

    /// Plot area for a container box: margins and controls removed, floored at the minimums.
    pub fn plot_size(&self, container_width: f64, container_height: f64) -> (f64, f64) {
        let m = &self.margins;
        let width = (container_width - m.left - m.right).max(self.min_width);
        let height = (container_height - m.top - m.bottom - self.controls_height).max(self.min_height);
        (width, height)
    }
}
