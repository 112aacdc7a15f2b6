use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{
    DeliveryType, ReportFormat, StaffLevel, StudyKind, Tier, BASE_REPORT_COST,
    MEETING_COST_PER_MEETING,
};
use crate::pricing::bus_estimate::{BusEstimator, DensityBusEstimator};
use crate::pricing::inputs::{InputError, ProjectInputs};
use crate::pricing::timeline::{build_timeline, Timeline};

/// 결과에 그대로 실어 보내는 프로젝트 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub client: Option<String>,
    pub start_date: NaiveDate,
    pub it_capacity_mw: f64,
    pub mechanical_load_mw: f64,
    pub house_load_mw: f64,
    pub total_load_mw: f64,
    pub estimated_buses: u32,
    pub tier: Tier,
    pub delivery_type: DeliveryType,
    pub report_format: ReportFormat,
    pub client_meetings_count: u32,
    pub margin_percent: f64,
}

impl ProjectInfo {
    /// 고객명이 없거나 공백이면 "Not Specified"
    pub fn client_label(&self) -> &str {
        self.client
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("Not Specified")
    }
}

/// 스터디 하나의 시간/비용 산출 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResult {
    pub kind: StudyKind,
    pub complexity: String,
    /// 총 시간 [h]
    pub hours: f64,
    pub senior_hours: f64,
    pub mid_hours: f64,
    pub junior_hours: f64,
    /// 등급별 비용 [₹] (긴급 배수 반영)
    pub senior_cost: f64,
    pub mid_cost: f64,
    pub junior_cost: f64,
    pub total_cost: f64,
}

impl StudyResult {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn hours_for(&self, level: StaffLevel) -> f64 {
        match level {
            StaffLevel::Senior => self.senior_hours,
            StaffLevel::Mid => self.mid_hours,
            StaffLevel::Junior => self.junior_hours,
        }
    }

    pub fn cost_for(&self, level: StaffLevel) -> f64 {
        match level {
            StaffLevel::Senior => self.senior_cost,
            StaffLevel::Mid => self.mid_cost,
            StaffLevel::Junior => self.junior_cost,
        }
    }
}

/// 집계 비용.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_study_cost: f64,
    pub meeting_cost: f64,
    pub report_cost: f64,
    pub subtotal: f64,
    pub margin_amount: f64,
    pub total_cost: f64,
    pub total_hours: f64,
}

/// 견적 엔진의 유일한 출력. 반환 후에는 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResult {
    pub info: ProjectInfo,
    /// 카탈로그 순서로 정렬된 스터디 결과
    pub studies: Vec<StudyResult>,
    pub costs: CostSummary,
    pub timeline: Timeline,
}

impl ProjectResult {
    pub fn study(&self, kind: StudyKind) -> Option<&StudyResult> {
        self.studies.iter().find(|s| s.kind == kind)
    }

    pub fn has_studies(&self) -> bool {
        !self.studies.is_empty()
    }

    pub fn estimated_buses(&self) -> u32 {
        self.info.estimated_buses
    }

    /// 프로젝트 전체 시간을 인력 등급별로 나눈 값 [h]
    pub fn resource_allocation(&self) -> [(StaffLevel, f64); 3] {
        StaffLevel::ALL.map(|level| (level, self.costs.total_hours * level.allocation()))
    }
}

/// 기본 모선 추정기로 견적을 계산한다.
pub fn evaluate(inputs: &ProjectInputs) -> Result<ProjectResult, InputError> {
    evaluate_with(inputs, &DensityBusEstimator)
}

fn price_study(kind: StudyKind, buses: u32, tier: Tier, urgency: f64) -> StudyResult {
    let hours = f64::from(buses) * kind.base_hours_per_bus() * tier.complexity_factor();
    let split = |level: StaffLevel| hours * level.allocation();
    let cost = |level: StaffLevel| split(level) * level.hourly_rate() * urgency;

    let senior_cost = cost(StaffLevel::Senior);
    let mid_cost = cost(StaffLevel::Mid);
    let junior_cost = cost(StaffLevel::Junior);
    StudyResult {
        kind,
        complexity: kind.complexity_label().to_string(),
        hours,
        senior_hours: split(StaffLevel::Senior),
        mid_hours: split(StaffLevel::Mid),
        junior_hours: split(StaffLevel::Junior),
        senior_cost,
        mid_cost,
        junior_cost,
        total_cost: senior_cost + mid_cost + junior_cost,
    }
}

/// 모선 추정기를 지정하여 견적을 계산한다.
///
/// 입력 검증을 통과하면 스터디가 하나도 선택되지 않았거나 부하가 0이어도
/// 항상 구조적으로 완전한 결과를 돌려준다.
pub fn evaluate_with(
    inputs: &ProjectInputs,
    estimator: &dyn BusEstimator,
) -> Result<ProjectResult, InputError> {
    inputs.validate()?;

    let total_load_mw = inputs.total_load_mw();
    let estimated_buses = estimator.estimate_buses(inputs)?;
    let urgency = inputs.effective_urgency_multiplier();
    debug!(total_load_mw, estimated_buses, urgency, "bus estimate");

    let studies: Vec<StudyResult> = StudyKind::ALL
        .into_iter()
        .filter(|kind| inputs.selected_studies.contains(kind))
        .map(|kind| price_study(kind, estimated_buses, inputs.tier, urgency))
        .collect();

    let total_hours: f64 = studies.iter().map(|s| s.hours).sum();
    let total_study_cost: f64 = studies.iter().map(|s| s.total_cost).sum();
    let meeting_cost = f64::from(inputs.client_meetings_count) * MEETING_COST_PER_MEETING;
    let report_cost = BASE_REPORT_COST * inputs.report_format.cost_multiplier();
    let subtotal = total_study_cost + meeting_cost + report_cost;
    let margin_amount = subtotal * inputs.margin_percent / 100.0;
    let costs = CostSummary {
        total_study_cost,
        meeting_cost,
        report_cost,
        subtotal,
        margin_amount,
        total_cost: subtotal + margin_amount,
        total_hours,
    };
    debug!(
        studies = studies.len(),
        total_hours,
        subtotal,
        total_cost = costs.total_cost,
        "cost summary"
    );

    let timeline = build_timeline(inputs.start_date, total_hours, inputs.delivery_type)?;

    Ok(ProjectResult {
        info: ProjectInfo {
            name: inputs.project_name.clone(),
            client: inputs.client_name.clone(),
            start_date: inputs.start_date,
            it_capacity_mw: inputs.it_capacity_mw,
            mechanical_load_mw: inputs.mechanical_load_mw,
            house_load_mw: inputs.house_load_mw,
            total_load_mw,
            estimated_buses,
            tier: inputs.tier,
            delivery_type: inputs.delivery_type,
            report_format: inputs.report_format,
            client_meetings_count: inputs.client_meetings_count,
            margin_percent: inputs.margin_percent,
        },
        studies,
        costs,
        timeline,
    })
}
