//! Equations shared by the Base and Environmental stages.

use super::domain::{MetricEntry, Scope};

const EXPLOITABILITY_COEFFICIENT: f64 = 8.22;
const UNCHANGED_IMPACT_COEFFICIENT: f64 = 6.42;
const CHANGED_IMPACT_COEFFICIENT: f64 = 7.52;
const CHANGED_SCOPE_MULTIPLIER: f64 = 1.08;

const PRIVILEGES_LOW_CHANGED: f64 = 0.68;
const PRIVILEGES_HIGH_CHANGED: f64 = 0.50;

pub const MAX_SCORE: f64 = 10.0;

/// Rounds up to one decimal place: `ceil(x * 10) / 10`.
pub fn round_up1(value: f64) -> f64 {
    (value * 10.0).ceil() / 10.0
}

/// Privileges Required weight after applying the Changed-scope override to `L` and `H`.
pub fn privileges_required(entry: MetricEntry, scope: Scope) -> f64 {
    match (scope, entry.level()) {
        (Scope::Changed, "L") => PRIVILEGES_LOW_CHANGED,
        (Scope::Changed, "H") => PRIVILEGES_HIGH_CHANGED,
        _ => entry.value,
    }
}

pub fn exploitability(
    attack_vector: f64,
    attack_complexity: f64,
    privileges_required: f64,
    user_interaction: f64,
) -> f64 {
    EXPLOITABILITY_COEFFICIENT
        * attack_vector
        * attack_complexity
        * privileges_required
        * user_interaction
}

/// `1 - (1 - c) * (1 - i) * (1 - a)`.
pub fn impact_subscore(confidentiality: f64, integrity: f64, availability: f64) -> f64 {
    1.0 - (1.0 - confidentiality) * (1.0 - integrity) * (1.0 - availability)
}

/// Impact score and the unrounded total for the given scope branch.
pub fn scope_adjusted(impact_sub: f64, exploitability: f64, scope: Scope) -> (f64, f64) {
    match scope {
        Scope::Unchanged => {
            let impact = UNCHANGED_IMPACT_COEFFICIENT * impact_sub;
            (impact, impact + exploitability)
        }
        Scope::Changed => {
            let impact = CHANGED_IMPACT_COEFFICIENT * (impact_sub - 0.029)
                - 3.25 * (impact_sub - 0.02).powf(15.0);
            (impact, CHANGED_SCOPE_MULTIPLIER * (impact + exploitability))
        }
    }
}

/// One-decimal rendering used for every displayed score.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}
