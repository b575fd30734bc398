use cvss_v3::scoring::{
    compute_all, round_up1, BaseMetrics, CvssError, MetricGroup, OverallSource, Selections,
    Severity,
};
use proptest::prelude::*;

const CRITICAL: &str = "AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";

fn selections(vector: &str) -> Selections {
    Selections::from_vector(vector).expect("valid vector")
}

#[test]
fn no_impact_vector_scores_zero_despite_exploitability() {
    let report = compute_all(&selections("AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N"))
        .expect("complete selection");

    assert_eq!(report.base.impact_score, 0.0);
    assert_eq!(report.base.base_score, 0.0);
    assert!((report.base.exploit_score - 3.887042775).abs() < 1e-9);
    assert_eq!(report.overall_severity, Severity::None);
}

#[test]
fn changed_scope_with_no_privileges_is_clamped() {
    let report = compute_all(&selections("AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H"))
        .expect("complete selection");

    assert!((report.base.impact_subscore - 0.914816).abs() < 1e-12);
    assert!((report.base.impact_score - 6.0477304915445185).abs() < 1e-9);
    assert!((report.base.exploit_score - 3.887042775).abs() < 1e-9);
    assert_eq!(report.base.base_score, 10.0);
}

#[test]
fn raised_requirements_clamp_environmental_score() {
    let report = compute_all(&selections(
        "AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H/CR:H/IR:H/AR:H/MAV:X/MAC:X/MPR:X/MUI:X/MS:X/MC:X/MI:X/MA:X",
    ))
    .expect("complete selection");

    let environmental = report.environmental.expect("environmental stage ran");
    assert_eq!(environmental.modified_impact_subscore, 0.915);
    assert_eq!(environmental.environmental_score, 10.0);
    assert_eq!(report.overall_source, OverallSource::Environmental);
    assert_eq!(report.overall_severity, Severity::Critical);
}

#[test]
fn stages_run_only_for_groups_with_selections() {
    let mut state = selections(CRITICAL);
    let report = compute_all(&state).expect("base only");
    assert_eq!(report.overall_source, OverallSource::Base);

    state
        .set(MetricGroup::Temporal, "ex", "E:U")
        .expect("valid temporal choice");
    state
        .set(MetricGroup::Temporal, "rl", "RL:O")
        .expect("valid temporal choice");
    state
        .set(MetricGroup::Temporal, "rc", "RC:U")
        .expect("valid temporal choice");
    let report = compute_all(&state).expect("base + temporal");
    assert_eq!(report.overall_source, OverallSource::Temporal);
    assert_eq!(report.overall_score, 7.8);
    assert_eq!(report.temporal_severity, Some(Severity::High));

    state
        .set(MetricGroup::Environmental, "mci", "MC:N")
        .expect("valid environmental choice");
    state
        .set(MetricGroup::Environmental, "mii", "MI:N")
        .expect("valid environmental choice");
    state
        .set(MetricGroup::Environmental, "mai", "MA:N")
        .expect("valid environmental choice");
    let report = compute_all(&state).expect("all stages");
    assert_eq!(report.overall_source, OverallSource::Environmental);
    assert_eq!(report.overall_score, 0.0);
    assert_eq!(
        report.vector,
        "AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/E:U/RL:O/RC:U/CR:X/IR:X/AR:X/MAV:X/MAC:X/MPR:X/MUI:X/MS:X/MC:N/MI:N/MA:N"
    );
}

#[test]
fn temporal_and_environmental_combine_through_product() {
    let report = compute_all(&selections(
        "AV:N/AC:L/PR:L/UI:N/S:U/C:H/I:H/A:H/E:P/RL:T/RC:R/CR:L/IR:M/AR:H/MAV:A/MAC:H/MPR:H/MUI:R/MS:U/MC:L/MI:N/MA:H",
    ))
    .expect("all stages");

    assert_eq!(report.base.base_score, 8.8);
    let temporal = report.temporal.expect("temporal ran");
    assert_eq!(temporal.temporal_score, 7.7);
    let environmental = report.environmental.expect("environmental ran");
    assert_eq!(environmental.environmental_score, 5.2);
    assert_eq!(report.overall_score, 5.2);
    assert_eq!(report.overall_severity, Severity::Medium);
}

#[test]
fn clearing_base_makes_calculation_incomplete() {
    let mut state = selections(CRITICAL);
    state.clear(MetricGroup::Base);
    assert!(!state.is_ready());

    match compute_all(&state) {
        Err(CvssError::IncompleteSelection { missing }) => assert_eq!(missing.len(), 8),
        other => panic!("expected incomplete selection, got {other:?}"),
    }
}

#[test]
fn reports_are_independent_between_calls() {
    let first = compute_all(&selections(CRITICAL)).expect("scores");
    let second =
        compute_all(&selections("AV:P/AC:H/PR:H/UI:R/S:U/C:L/I:N/A:N")).expect("scores");
    assert_eq!(first.overall_score, 9.8);
    assert_eq!(second.overall_score, 1.6);
    assert_eq!(
        compute_all(&selections(CRITICAL)).expect("scores"),
        first
    );
}

fn base_vector() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["AV:N", "AV:A", "AV:L", "AV:P"]),
        prop::sample::select(vec!["AC:L", "AC:H"]),
        prop::sample::select(vec!["PR:N", "PR:L", "PR:H"]),
        prop::sample::select(vec!["UI:N", "UI:R"]),
        prop::sample::select(vec!["S:U", "S:C"]),
        prop::sample::select(vec!["C:N", "C:L", "C:H"]),
        prop::sample::select(vec!["I:N", "I:L", "I:H"]),
        prop::sample::select(vec!["A:N", "A:L", "A:H"]),
    )
        .prop_map(|(av, ac, pr, ui, s, c, i, a)| {
            [av, ac, pr, ui, s, c, i, a].join("/")
        })
}

proptest! {
    #[test]
    fn round_up1_is_idempotent(value in -20.0f64..20.0) {
        let once = round_up1(value);
        prop_assert_eq!(round_up1(once), once);
    }

    #[test]
    fn base_score_is_bounded_tenth(vector in base_vector()) {
        let report = compute_all(&selections(&vector)).expect("complete selection");
        let score = report.base.base_score;
        prop_assert!((0.0..=10.0).contains(&score));
        prop_assert_eq!(round_up1(score), score);
        prop_assert_eq!(report.vector, vector);
    }

    #[test]
    fn not_defined_groups_leave_base_unchanged(vector in base_vector()) {
        let state = selections(&vector);
        let metrics = BaseMetrics::from_selection(&state.base).expect("complete selection");
        let base_score = cvss_v3::scoring::base::score_metrics(&metrics).base_score;

        let temporal = cvss_v3::scoring::temporal::calculate(base_score, &state.temporal)
            .expect("defaults resolve");
        prop_assert_eq!(temporal.temporal_score, round_up1(base_score));

        let environmental =
            cvss_v3::scoring::environmental::calculate(&state.environmental, &metrics, 1.0)
                .expect("defaults resolve");
        prop_assert_eq!(environmental.environmental_score, base_score);
    }
}
