use super::base::{self, BaseMetrics, BaseScore};
use super::domain::{CvssError, Severity};
use super::environmental::{self, EnvironmentalScore};
use super::formula::format_score;
use super::selection::Selections;
use super::temporal::{self, TemporalScore, NEUTRAL_PRODUCT};
use crate::vector;
use serde::Serialize;
use tracing::info;

/// Which stage produced the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallSource {
    Base,
    Temporal,
    Environmental,
}

/// Fresh, independently owned result of one orchestrated calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub base: BaseScore,
    pub base_severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental: Option<EnvironmentalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environmental_severity: Option<Severity>,
    pub overall_score: f64,
    pub overall_severity: Severity,
    pub overall_source: OverallSource,
    pub vector: String,
}

impl CalculationReport {
    /// Scores as they are displayed, each with one decimal place.
    pub fn display_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("Base Score", format_score(self.base.base_score)),
            ("Impact Subscore", format_score(self.base.impact_score)),
            ("Exploitability Subscore", format_score(self.base.exploit_score)),
        ];

        if let Some(temporal) = &self.temporal {
            lines.push(("Temporal Score", format_score(temporal.temporal_score)));
        }

        if let Some(environmental) = &self.environmental {
            lines.push((
                "Environmental Score",
                format_score(environmental.environmental_score),
            ));
            lines.push((
                "Modified Impact Subscore",
                format_score(environmental.modified_impact_score),
            ));
        }

        lines.push(("Overall Score", format_score(self.overall_score)));
        lines
    }
}

/// Runs Base always, then Temporal and Environmental when their groups carry selections.
pub fn compute_all(selections: &Selections) -> Result<CalculationReport, CvssError> {
    let base_metrics = BaseMetrics::from_selection(&selections.base)?;
    let base = base::score_metrics(&base_metrics);

    let mut overall_score = base.base_score;
    let mut overall_source = OverallSource::Base;

    let temporal = if selections.temporal.has_selections() {
        let score = temporal::calculate(base.base_score, &selections.temporal)?;
        overall_score = score.temporal_score;
        overall_source = OverallSource::Temporal;
        Some(score)
    } else {
        None
    };

    let environmental: Option<EnvironmentalScore> = if selections.environmental.has_selections()
    {
        let temporal_product = temporal
            .as_ref()
            .map(|score| score.temporal_product)
            .unwrap_or(NEUTRAL_PRODUCT);
        let score =
            environmental::calculate(&selections.environmental, &base_metrics, temporal_product)?;
        overall_score = score.environmental_score;
        overall_source = OverallSource::Environmental;
        Some(score)
    } else {
        None
    };

    let vector = vector::serialize(selections);
    info!(%vector, overall_score, ?overall_source, "cvss scores computed");

    Ok(CalculationReport {
        base_severity: Severity::from_score(base.base_score),
        temporal_severity: temporal
            .as_ref()
            .map(|score| Severity::from_score(score.temporal_score)),
        environmental_severity: environmental
            .as_ref()
            .map(|score| Severity::from_score(score.environmental_score)),
        base,
        temporal,
        environmental,
        overall_score,
        overall_severity: Severity::from_score(overall_score),
        overall_source,
        vector,
    })
}
