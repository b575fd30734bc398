use super::domain::{CvssError, MetricEntry, Scope};
use super::formula::{
    exploitability, impact_subscore, privileges_required, round_up1, scope_adjusted, MAX_SCORE,
};
use super::selection::SelectionState;
use serde::Serialize;
use tracing::debug;

/// Resolved Base entries; the Environmental merge inherits from these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseMetrics {
    pub attack_vector: MetricEntry,
    pub attack_complexity: MetricEntry,
    pub privileges_required: MetricEntry,
    pub user_interaction: MetricEntry,
    pub scope: MetricEntry,
    pub confidentiality: MetricEntry,
    pub integrity: MetricEntry,
    pub availability: MetricEntry,
}

impl BaseMetrics {
    pub fn from_selection(selection: &SelectionState) -> Result<Self, CvssError> {
        let missing = selection.missing();
        if !missing.is_empty() {
            return Err(CvssError::IncompleteSelection { missing });
        }

        Ok(Self {
            attack_vector: selection.entry("av")?,
            attack_complexity: selection.entry("ac")?,
            privileges_required: selection.entry("pr")?,
            user_interaction: selection.entry("ui")?,
            scope: selection.entry("scp")?,
            confidentiality: selection.entry("ci")?,
            integrity: selection.entry("ii")?,
            availability: selection.entry("ai")?,
        })
    }

    pub fn scope(&self) -> Scope {
        Scope::from_weight(self.scope.value)
    }

    /// Privileges Required weight as used by the Base equation.
    pub fn privileges_weight(&self) -> f64 {
        privileges_required(self.privileges_required, self.scope())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseScore {
    pub impact_subscore: f64,
    pub impact_score: f64,
    pub exploit_score: f64,
    pub base_score: f64,
    pub scope: Scope,
}

/// Scores a complete Base selection.
pub fn calculate(selection: &SelectionState) -> Result<BaseScore, CvssError> {
    let metrics = BaseMetrics::from_selection(selection)?;
    Ok(score_metrics(&metrics))
}

pub fn score_metrics(metrics: &BaseMetrics) -> BaseScore {
    let scope = metrics.scope();
    let impact_sub = impact_subscore(
        metrics.confidentiality.value,
        metrics.integrity.value,
        metrics.availability.value,
    );
    let exploit_score = exploitability(
        metrics.attack_vector.value,
        metrics.attack_complexity.value,
        metrics.privileges_weight(),
        metrics.user_interaction.value,
    );
    let (impact_score, raw_total) = scope_adjusted(impact_sub, exploit_score, scope);

    debug!(
        impact_sub,
        exploit_score,
        impact_score,
        raw_total,
        scope = scope.label(),
        "base sub-scores"
    );

    let (impact_score, base_score) = if impact_score <= 0.0 {
        (0.0, 0.0)
    } else {
        (impact_score, round_up1(raw_total).min(MAX_SCORE))
    };

    BaseScore {
        impact_subscore: impact_sub,
        impact_score,
        exploit_score,
        base_score,
        scope,
    }
}
