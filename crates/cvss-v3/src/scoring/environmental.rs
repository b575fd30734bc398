use super::base::BaseMetrics;
use super::domain::{CvssError, MetricEntry, Scope};
use super::formula::{
    exploitability, impact_subscore, privileges_required, round_up1, scope_adjusted, MAX_SCORE,
};
use super::selection::SelectionState;
use serde::Serialize;
use tracing::debug;

/// Ceiling on the modified impact sub-score once requirement multipliers are applied.
const MAX_MODIFIED_IMPACT_SUB: f64 = 0.915;

/// Environmental weights after "Not Defined" modified metrics fall back to Base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedMetrics {
    pub confidentiality_requirement: f64,
    pub integrity_requirement: f64,
    pub availability_requirement: f64,
    pub attack_vector: f64,
    pub attack_complexity: f64,
    pub privileges_required: f64,
    pub user_interaction: f64,
    pub scope: Scope,
    pub confidentiality: f64,
    pub integrity: f64,
    pub availability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalScore {
    pub modified_impact_subscore: f64,
    pub modified_impact_score: f64,
    pub modified_exploit_score: f64,
    pub environmental_score: f64,
    pub merged: MergedMetrics,
}

fn inherit(modified: MetricEntry, base: MetricEntry) -> MetricEntry {
    if modified.inherits_from_base() {
        base
    } else {
        modified
    }
}

/// Resolves every modified metric against the Base choice it overrides.
pub fn merge(selection: &SelectionState, base: &BaseMetrics) -> Result<MergedMetrics, CvssError> {
    let scope_entry = inherit(selection.entry("mscp")?, base.scope);
    let scope = Scope::from_weight(scope_entry.value);
    let privileges = inherit(selection.entry("mpr")?, base.privileges_required);

    Ok(MergedMetrics {
        confidentiality_requirement: selection.entry("cr")?.value,
        integrity_requirement: selection.entry("ir")?.value,
        availability_requirement: selection.entry("ar")?.value,
        attack_vector: inherit(selection.entry("mav")?, base.attack_vector).value,
        attack_complexity: inherit(selection.entry("mac")?, base.attack_complexity).value,
        privileges_required: privileges_required(privileges, scope),
        user_interaction: inherit(selection.entry("mui")?, base.user_interaction).value,
        scope,
        confidentiality: inherit(selection.entry("mci")?, base.confidentiality).value,
        integrity: inherit(selection.entry("mii")?, base.integrity).value,
        availability: inherit(selection.entry("mai")?, base.availability).value,
    })
}

/// Scores the Environmental group; `temporal_product` is 1.0 when Temporal was skipped.
pub fn calculate(
    selection: &SelectionState,
    base: &BaseMetrics,
    temporal_product: f64,
) -> Result<EnvironmentalScore, CvssError> {
    let merged = merge(selection, base)?;
    Ok(score_merged(merged, temporal_product))
}

pub fn score_merged(merged: MergedMetrics, temporal_product: f64) -> EnvironmentalScore {
    let impact_sub = impact_subscore(
        merged.confidentiality * merged.confidentiality_requirement,
        merged.integrity * merged.integrity_requirement,
        merged.availability * merged.availability_requirement,
    )
    .min(MAX_MODIFIED_IMPACT_SUB);
    let exploit_score = exploitability(
        merged.attack_vector,
        merged.attack_complexity,
        merged.privileges_required,
        merged.user_interaction,
    );
    let (impact_score, environ_sub) = scope_adjusted(impact_sub, exploit_score, merged.scope);

    debug!(
        impact_sub,
        exploit_score,
        impact_score,
        environ_sub,
        temporal_product,
        scope = merged.scope.label(),
        "environmental sub-scores"
    );

    let (impact_score, environmental_score) = if impact_score <= 0.0 {
        (0.0, 0.0)
    } else {
        let environ_sub = round_up1(environ_sub.min(MAX_SCORE));
        (impact_score, round_up1(environ_sub * temporal_product))
    };

    EnvironmentalScore {
        modified_impact_subscore: impact_sub,
        modified_impact_score: impact_score,
        modified_exploit_score: exploit_score,
        environmental_score,
        merged,
    }
}
