pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod math;
pub mod model;

pub use chart::{AgeChart, ChartFrame, UpdateOutcome};
pub use config::{ChartConfig, NationalStackedPolicy};
pub use error::{DataJoinError, RatioError, TableError};
pub use model::ratio::{resolve_age_shares, resolve_gender, ShareMode};
pub use model::selection::{DashboardEvent, Layout, SelectionState};
