//! 견적 엔진 회귀 테스트. Tier III, 7.5 MW 기준 시나리오를 손계산 값과 비교한다.
use std::collections::BTreeSet;

use chrono::NaiveDate;
use dc_power_study_estimator::catalog::{
    self, DeliveryType, ReportFormat, StaffLevel, StudyKind, Tier,
};
use dc_power_study_estimator::pricing::{
    evaluate, evaluate_with, BusEstimator, InputError, ProjectInputs,
};

fn assert_close(label: &str, actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "{label} expected {expected} got {actual}"
    );
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid date")
}

/// 5 + 2 + 0.5 MW, Tier III, 전 스터디, 일반 납기, 상세 보고서, 회의 2회, 마진 15%
fn reference_inputs() -> ProjectInputs {
    ProjectInputs::new(start())
}

#[test]
fn rate_allocations_sum_to_one() {
    catalog::verify_rate_allocations().expect("allocations");
    assert_eq!(StaffLevel::Senior.allocation(), 0.20);
    assert_eq!(StaffLevel::Mid.allocation(), 0.30);
    assert_eq!(StaffLevel::Junior.allocation(), 0.50);
}

#[test]
fn reference_scenario_hours() {
    let result = evaluate(&reference_inputs()).expect("evaluate");
    assert_close("total load", result.info.total_load_mw, 7.5);
    assert_eq!(result.estimated_buses(), 15);

    let expected = [
        (StudyKind::LoadFlow, 18.0),
        (StudyKind::ShortCircuit, 22.5),
        (StudyKind::ProtectiveDeviceCoordination, 33.75),
        (StudyKind::ArcFlash, 27.0),
    ];
    let kinds: Vec<StudyKind> = result.studies.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, StudyKind::ALL.to_vec());
    for (kind, hours) in expected {
        let study = result.study(kind).expect("study present");
        assert_close(kind.display_name(), study.hours, hours);
    }
    assert_close("total hours", result.costs.total_hours, 101.25);
}

#[test]
fn reference_scenario_costs() {
    let result = evaluate(&reference_inputs()).expect("evaluate");
    let costs = &result.costs;
    // 혼합 단가 0.2×1200 + 0.3×650 + 0.5×350 = 610 ₹/h
    assert_close("study cost", costs.total_study_cost, 101.25 * 610.0);
    assert_close("meeting cost", costs.meeting_cost, 16_000.0);
    assert_close("report cost", costs.report_cost, 27_000.0);
    assert_close("subtotal", costs.subtotal, 104_762.5);
    assert_close("margin", costs.margin_amount, 15_714.375);
    assert_close("total", costs.total_cost, 120_476.875);
    assert_close(
        "total formula",
        costs.total_cost,
        (costs.total_study_cost + costs.meeting_cost + costs.report_cost)
            * (1.0 + 15.0 / 100.0),
    );
}

#[test]
fn staff_split_matches_total_hours() {
    let result = evaluate(&reference_inputs()).expect("evaluate");
    for study in &result.studies {
        let split = study.senior_hours + study.mid_hours + study.junior_hours;
        assert_close("split hours", split, study.hours);
        assert_close("senior share", study.senior_hours, study.hours * 0.20);
        assert_close("mid share", study.mid_hours, study.hours * 0.30);
        assert_close("junior share", study.junior_hours, study.hours * 0.50);
        let split_cost = study.senior_cost + study.mid_cost + study.junior_cost;
        assert_close("split cost", split_cost, study.total_cost);
    }
}

#[test]
fn empty_selection_keeps_other_costs() {
    let mut inputs = reference_inputs();
    inputs.selected_studies = BTreeSet::new();
    let result = evaluate(&inputs).expect("evaluate");

    assert!(!result.has_studies());
    assert_eq!(result.costs.total_hours, 0.0);
    assert_eq!(result.costs.total_study_cost, 0.0);
    assert_close("meeting cost", result.costs.meeting_cost, 16_000.0);
    assert_close("report cost", result.costs.report_cost, 27_000.0);
    assert_close("margin", result.costs.margin_amount, 43_000.0 * 0.15);
    assert_eq!(result.estimated_buses(), 15);
    // 최소 4일 × 0.8 → 4일
    assert_eq!(result.timeline.duration_days, 4);
}

#[test]
fn urgent_delivery_scales_cost_not_hours() {
    let standard = evaluate(&reference_inputs()).expect("standard");
    let mut inputs = reference_inputs();
    inputs.delivery_type = DeliveryType::Urgent;
    let urgent = evaluate(&inputs).expect("urgent");

    assert_eq!(urgent.estimated_buses(), standard.estimated_buses());
    for (u, s) in urgent.studies.iter().zip(&standard.studies) {
        assert_close("hours", u.hours, s.hours);
        assert_close("cost", u.total_cost, s.total_cost * 1.3);
    }
    assert_close("meeting cost", urgent.costs.meeting_cost, standard.costs.meeting_cost);
    assert_close("report cost", urgent.costs.report_cost, standard.costs.report_cost);
}

#[test]
fn urgency_multiplier_override_applies_only_when_urgent() {
    let mut inputs = reference_inputs();
    inputs.urgency_cost_multiplier = 2.0;
    let standard = evaluate(&inputs).expect("standard");
    assert_close("standard cost", standard.costs.total_study_cost, 101.25 * 610.0);

    inputs.delivery_type = DeliveryType::Urgent;
    let urgent = evaluate(&inputs).expect("urgent");
    assert_close("urgent cost", urgent.costs.total_study_cost, 101.25 * 610.0 * 2.0);
}

#[test]
fn timeline_compression_and_end_date() {
    let standard = evaluate(&reference_inputs()).expect("standard");
    // max(4, 101.25/8) × 0.8 = 10.125 → 11
    assert_eq!(standard.timeline.duration_days, 11);
    assert_eq!(
        standard.timeline.end_date,
        NaiveDate::from_ymd_opt(2025, 1, 17).expect("date")
    );

    let mut inputs = reference_inputs();
    inputs.delivery_type = DeliveryType::Urgent;
    let urgent = evaluate(&inputs).expect("urgent");
    // 12.65625 × 0.6 = 7.59 → 8
    assert_eq!(urgent.timeline.duration_days, 8);
    assert!(urgent.timeline.duration_days <= standard.timeline.duration_days);
}

#[test]
fn urgent_timeline_never_below_three_days() {
    for tier in Tier::ALL {
        for load in [0.0, 0.1, 0.3, 1.0, 40.0] {
            let mut inputs = reference_inputs();
            inputs.tier = tier;
            inputs.it_capacity_mw = load;
            inputs.mechanical_load_mw = 0.0;
            inputs.house_load_mw = 0.0;
            inputs.delivery_type = DeliveryType::Urgent;
            let urgent = evaluate(&inputs).expect("urgent");
            inputs.delivery_type = DeliveryType::Standard;
            let standard = evaluate(&inputs).expect("standard");
            assert!(urgent.timeline.duration_days >= 3);
            assert!(urgent.timeline.duration_days <= standard.timeline.duration_days);
        }
    }
}

#[test]
fn phases_are_contiguous_from_start() {
    let result = evaluate(&reference_inputs()).expect("evaluate");
    let phases = &result.timeline.phases;
    assert_eq!(phases.len(), 6);
    assert_eq!(phases[0].start_date, result.timeline.start_date);
    for pair in phases.windows(2) {
        assert_eq!(pair[0].end_date, pair[1].start_date);
    }
    for phase in phases {
        assert!(phase.duration_days >= 1);
        assert_eq!(
            (phase.end_date - phase.start_date).num_days(),
            i64::from(phase.duration_days)
        );
    }
    // 11일 기준: 1, 2, 3, 5(최소), 2(최소), 1
    let days: Vec<u32> = phases.iter().map(|p| p.duration_days).collect();
    assert_eq!(days, vec![1, 2, 3, 5, 2, 1]);
}

#[test]
fn bus_count_rounds_up() {
    let mut inputs = reference_inputs();
    inputs.tier = Tier::IV;
    inputs.it_capacity_mw = 1.0;
    inputs.mechanical_load_mw = 0.5;
    inputs.house_load_mw = 0.5;
    // 2.0 × 2.3 = 4.6 → 5
    assert_eq!(evaluate(&inputs).expect("evaluate").estimated_buses(), 5);

    inputs.bus_per_mw_calibration = 0.5;
    // 2.3 → 3
    assert_eq!(evaluate(&inputs).expect("evaluate").estimated_buses(), 3);
}

#[test]
fn zero_load_is_a_valid_all_zero_result() {
    let mut inputs = reference_inputs();
    inputs.it_capacity_mw = 0.0;
    inputs.mechanical_load_mw = 0.0;
    inputs.house_load_mw = 0.0;
    let result = evaluate(&inputs).expect("evaluate");
    assert_eq!(result.estimated_buses(), 0);
    assert_eq!(result.studies.len(), 4);
    assert_eq!(result.costs.total_hours, 0.0);
    assert!(inputs
        .guardrail_warnings()
        .iter()
        .any(|w| w.contains("Total load is zero")));
}

#[test]
fn invalid_inputs_fail_fast() {
    let mut inputs = reference_inputs();
    inputs.mechanical_load_mw = -1.0;
    assert_eq!(
        evaluate(&inputs),
        Err(InputError::Negative {
            field: "mechanical_load_mw",
            value: -1.0
        })
    );

    let mut inputs = reference_inputs();
    inputs.margin_percent = f64::NAN;
    assert!(matches!(
        evaluate(&inputs),
        Err(InputError::NotFinite {
            field: "margin_percent",
            ..
        })
    ));

    let mut inputs = reference_inputs();
    inputs.bus_per_mw_calibration = -0.1;
    assert!(evaluate(&inputs).is_err());
}

#[test]
fn bus_count_beyond_u32_is_rejected() {
    let mut inputs = reference_inputs();
    inputs.selected_studies = BTreeSet::new();
    inputs.it_capacity_mw = 3.0e9;
    assert!(matches!(
        evaluate(&inputs),
        Err(InputError::BusCountOutOfRange { value }) if value >= 6.0e9
    ));

    // 각 값은 유한하지만 합이 무한대
    let mut inputs = reference_inputs();
    inputs.it_capacity_mw = f64::MAX;
    inputs.mechanical_load_mw = f64::MAX;
    assert!(matches!(
        evaluate(&inputs),
        Err(InputError::BusCountOutOfRange { .. })
    ));
}

#[test]
fn huge_load_end_date_out_of_calendar() {
    let mut inputs = reference_inputs();
    inputs.it_capacity_mw = 1.0e8;
    assert!(matches!(
        evaluate(&inputs),
        Err(InputError::DateOutOfRange { .. })
    ));
}

#[test]
fn margin_has_no_upper_bound() {
    let mut inputs = reference_inputs();
    inputs.margin_percent = 100.0;
    let result = evaluate(&inputs).expect("evaluate");
    assert_close("doubled", result.costs.total_cost, result.costs.subtotal * 2.0);
    assert!(inputs
        .guardrail_warnings()
        .iter()
        .any(|w| w.starts_with("Margin")));
}

struct FixedBuses(u32);

impl BusEstimator for FixedBuses {
    fn estimate_buses(&self, _inputs: &ProjectInputs) -> Result<u32, InputError> {
        Ok(self.0)
    }
}

#[test]
fn bus_estimator_is_swappable() {
    let result = evaluate_with(&reference_inputs(), &FixedBuses(10)).expect("evaluate");
    assert_eq!(result.estimated_buses(), 10);
    let lf = result.study(StudyKind::LoadFlow).expect("load flow");
    assert_close("lf hours", lf.hours, 10.0 * 0.8 * 1.5);
}

#[test]
fn report_format_multipliers() {
    for (format, cost) in [
        (ReportFormat::Basic, 15_000.0),
        (ReportFormat::DetailedWithAppendices, 27_000.0),
        (ReportFormat::ClientBranded, 33_000.0),
    ] {
        let mut inputs = reference_inputs();
        inputs.report_format = format;
        let result = evaluate(&inputs).expect("evaluate");
        assert_close(format.label(), result.costs.report_cost, cost);
    }
}

#[test]
fn evaluation_is_deterministic() {
    let inputs = reference_inputs();
    assert_eq!(evaluate(&inputs), evaluate(&inputs));
}

#[test]
fn catalog_names_parse() {
    assert_eq!("III".parse::<Tier>(), Ok(Tier::III));
    assert_eq!("tier 4".parse::<Tier>(), Ok(Tier::IV));
    assert!("Tier V".parse::<Tier>().is_err());
    assert_eq!("urgent".parse::<DeliveryType>(), Ok(DeliveryType::Urgent));
    assert_eq!(
        "Client-Branded".parse::<ReportFormat>(),
        Ok(ReportFormat::ClientBranded)
    );
    assert_eq!(
        "pdc".parse::<StudyKind>(),
        Ok(StudyKind::ProtectiveDeviceCoordination)
    );
    assert!("harmonics".parse::<StudyKind>().is_err());
}

#[test]
fn inputs_deserialize_from_toml_with_defaults() {
    let inputs: ProjectInputs = toml::from_str(
        r#"
        it_capacity_mw = 5.0
        mechanical_load_mw = 2.0
        house_load_mw = 0.5
        tier = "III"
        delivery_type = "Standard"
        report_format = "DetailedWithAppendices"
        selected_studies = ["LoadFlow", "ArcFlash"]
        client_meetings_count = 2
        margin_percent = 15.0
        start_date = "2025-01-06"
        "#,
    )
    .expect("parse inputs");
    assert_eq!(inputs.bus_per_mw_calibration, 1.0);
    assert_eq!(inputs.urgency_cost_multiplier, 1.3);
    assert_eq!(inputs.project_name, "Data Center Power Studies");
    let result = evaluate(&inputs).expect("evaluate");
    assert_close("hours", result.costs.total_hours, 18.0 + 27.0);
}
