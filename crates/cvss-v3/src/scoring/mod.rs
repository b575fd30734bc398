pub mod base;
pub mod domain;
pub mod environmental;
pub mod formula;
pub mod registry;
mod report;
pub mod selection;
pub mod temporal;

pub use base::{BaseMetrics, BaseScore};
pub use domain::{CvssError, MetricEntry, MetricGroup, Scope, Severity};
pub use environmental::{EnvironmentalScore, MergedMetrics};
pub use formula::{format_score, round_up1};
pub use registry::{MetricDefinition, MetricRegistry};
pub use report::{compute_all, CalculationReport, OverallSource};
pub use selection::{SelectionState, Selections};
pub use temporal::TemporalScore;
