use super::domain::CvssError;
use super::formula::round_up1;
use super::selection::SelectionState;
use serde::Serialize;
use tracing::debug;

/// Multiplier applied downstream when the Temporal stage does not run.
pub const NEUTRAL_PRODUCT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalScore {
    pub temporal_score: f64,
    /// `E * RL * RC`, reused by the Environmental stage.
    pub temporal_product: f64,
}

pub fn temporal_product(selection: &SelectionState) -> Result<f64, CvssError> {
    let exploit_maturity = selection.entry("ex")?.value;
    let remediation_level = selection.entry("rl")?.value;
    let report_confidence = selection.entry("rc")?.value;
    Ok(exploit_maturity * remediation_level * report_confidence)
}

/// Adjusts an already computed Base score by the Temporal selections.
pub fn calculate(base_score: f64, selection: &SelectionState) -> Result<TemporalScore, CvssError> {
    let temporal_product = temporal_product(selection)?;
    let temporal_score = round_up1(base_score * temporal_product);

    debug!(base_score, temporal_product, temporal_score, "temporal score");

    Ok(TemporalScore {
        temporal_score,
        temporal_product,
    })
}
