use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Stacked,
    Grouped,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Stacked => "stacked",
            Layout::Grouped => "grouped",
        }
    }
}

impl std::str::FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stacked" => Ok(Layout::Stacked),
            "grouped" => Ok(Layout::Grouped),
            other => anyhow::bail!("unknown layout '{}', expected stacked or grouped", other),
        }
    }
}

/// What the panel currently shows. Owned by the chart controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_province: String,
    pub selected_layout: Layout,
}

impl SelectionState {
    pub fn new(default_province: impl Into<String>, default_layout: Layout) -> Self {
        Self {
            selected_province: default_province.into(),
            selected_layout: default_layout,
        }
    }
}

/// Events delivered to a panel. `province: None` means the selection was cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    ProvinceSelected { province: Option<String> },
    LayoutSelected { layout: Layout },
    Resize { width: f64, height: f64 },
}
