use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ChartConfig, NationalStackedPolicy};
use crate::io::sources::PanelData;
use crate::io::table::normalize_region;
use crate::layout::bars::{layout_bars, stack, Bar, StackedGeometry};
use crate::layout::overlay::{ratio_overlay, OverlayLine};
use crate::layout::transition::{Animator, TransitionPlan, TransitionTiming};
use crate::math::scale::{global_stack_max, left_upper, ScaleSet};
use crate::model::ratio::{resolve_age_shares, ShareMode};
use crate::model::records::{GenderRecord, PopulationRecord};
use crate::model::selection::{DashboardEvent, Layout, SelectionState};

/// Everything the shell needs to draw one render of the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub province: String,
    pub layout: Layout,
    pub share_mode: ShareMode,
    pub width: f64,
    pub height: f64,
    pub years: Vec<String>,
    pub values: Vec<[f64; 3]>,
    pub stacked: StackedGeometry,
    pub scales: ScaleSet,
    pub bars: Vec<Bar>,
    pub overlay: [OverlayLine; 2],
    pub transition: TransitionPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Rendered(Box<ChartFrame>),
    /// The selected province has no loaded records; nothing was drawn.
    NoData { province: String },
    /// Stacked was requested for the national aggregate under `NationalStackedPolicy::Ignore`.
    Ignored { province: String, layout: Layout },
}

impl UpdateOutcome {
    pub fn frame(&self) -> Option<&ChartFrame> {
        match self {
            UpdateOutcome::Rendered(frame) => Some(frame.as_ref()),
            _ => None,
        }
    }
}

/// Controller of the age-structure panel: owns the records, the selection and the animator.
pub struct AgeChart {
    cfg: ChartConfig,
    population: Vec<PopulationRecord>,
    gender: Vec<GenderRecord>,
    global_max: f64,
    selection: SelectionState,
    container: (f64, f64),
    animator: Animator,
    last_frame: Option<ChartFrame>,
}

impl AgeChart {
    pub fn new(population: Vec<PopulationRecord>, gender: Vec<GenderRecord>, cfg: ChartConfig) -> anyhow::Result<Self> {
        cfg.check()?;
        // Stacked never draws the national aggregate, so it only joins the shared axis
        // when grouped bars are absolute.
        let global_max = if cfg.grouped_values == ShareMode::Absolute {
            global_stack_max(&population)
        } else {
            let national = normalize_region(&cfg.national_label);
            global_stack_max(population.iter().filter(|r| normalize_region(&r.province) != national))
        };
        let selection = SelectionState::new(cfg.default_province.clone(), cfg.default_layout);
        let container = (cfg.container_width, cfg.container_height);
        Ok(Self {
            cfg,
            population,
            gender,
            global_max,
            selection,
            container,
            animator: Animator::default(),
            last_frame: None,
        })
    }

    pub fn from_panel_data(data: PanelData, cfg: ChartConfig) -> anyhow::Result<Self> {
        Self::new(data.population, data.gender, cfg)
    }

    pub fn config(&self) -> &ChartConfig {
        &self.cfg
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn last_frame(&self) -> Option<&ChartFrame> {
        self.last_frame.as_ref()
    }

    /// Distinct provinces in load order.
    pub fn provinces(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in &self.population {
            if !out.contains(&r.province.as_str()) {
                out.push(&r.province);
            }
        }
        out
    }

    fn is_national(&self, province: &str) -> bool {
        normalize_region(province) == normalize_region(&self.cfg.national_label)
    }

    /// Whether the stacked control should be enabled for the current selection.
    pub fn stacked_enabled(&self) -> bool {
        !self.is_national(&self.selection.selected_province)
    }

    /// Apply an event to the selection and re-render.
    pub fn dispatch(&mut self, event: DashboardEvent) -> UpdateOutcome {
        match event {
            DashboardEvent::ProvinceSelected { province } => {
                self.selection.selected_province = province.unwrap_or_else(|| self.cfg.default_province.clone());
                if !self.stacked_enabled()
                    && self.cfg.national_stacked == NationalStackedPolicy::FallbackToGrouped
                {
                    self.selection.selected_layout = Layout::Grouped;
                }
            }
            DashboardEvent::LayoutSelected { layout } => self.selection.selected_layout = layout,
            DashboardEvent::Resize { width, height } => self.container = (width, height),
        }
        self.update()
    }

    /// Render the current selection.
    pub fn update(&mut self) -> UpdateOutcome {
        let province = self.selection.selected_province.clone();
        let mut layout = self.selection.selected_layout;

        if layout == Layout::Stacked && self.is_national(&province) {
            match self.cfg.national_stacked {
                NationalStackedPolicy::Ignore => {
                    warn!(province = %province, "stacked layout not available for the national aggregate");
                    return UpdateOutcome::Ignored { province, layout };
                }
                NationalStackedPolicy::FallbackToGrouped => {
                    layout = Layout::Grouped;
                    self.selection.selected_layout = layout;
                }
            }
        }

        let key = normalize_region(&province);
        let rows: Vec<&PopulationRecord> = self
            .population
            .iter()
            .filter(|r| normalize_region(&r.province) == key)
            .collect();
        if rows.is_empty() {
            debug!(province = %province, "no records for selection");
            return UpdateOutcome::NoData { province };
        }

        let share_mode = self.cfg.share_mode(layout);
        let years: Vec<String> = rows.iter().map(|r| r.year.clone()).collect();
        let values: Vec<[f64; 3]> = rows
            .iter()
            .map(|r| resolve_age_shares(r.child, r.adult, r.elder, share_mode))
            .collect();

        let (width, height) = self.cfg.plot_size(self.container.0, self.container.1);
        let upper = left_upper(share_mode, self.global_max);
        let scales = ScaleSet::compute(years.clone(), upper, width, height, &self.cfg);

        // Every render starts from the stacked arrangement of the new data.
        let entry = layout_bars(Layout::Stacked, &years, &values, &scales);
        let bars = layout_bars(layout, &years, &values, &scales);

        let region_gender: Vec<&GenderRecord> = self
            .gender
            .iter()
            .filter(|g| normalize_region(&g.region) == key)
            .collect();
        let overlay = ratio_overlay(&region_gender, &scales);

        let timing = TransitionTiming { phase_ms: self.cfg.phase_ms, stagger_ms: self.cfg.stagger_ms };
        let transition = self.animator.begin(&entry, &bars, timing).clone();

        debug!(
            province = %province,
            layout = layout.as_str(),
            bars = bars.len(),
            generation = transition.generation,
            "chart rendered"
        );

        let frame = ChartFrame {
            province,
            layout,
            share_mode,
            width,
            height,
            stacked: stack(&values),
            years,
            values,
            scales,
            bars,
            overlay,
            transition,
        };
        self.last_frame = Some(frame.clone());
        UpdateOutcome::Rendered(Box::new(frame))
    }
}
