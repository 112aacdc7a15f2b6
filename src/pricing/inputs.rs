use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    DeliveryType, ReportFormat, StudyKind, Tier, DEFAULT_URGENCY_COST_MULTIPLIER,
};

pub const DEFAULT_PROJECT_NAME: &str = "Data Center Power Studies";

/// 입력값 검증 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// NaN 또는 무한대
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    /// 음수 입력
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// 종료일이 달력 범위를 벗어남
    #[error("end date out of range: {start} + {days} days")]
    DateOutOfRange { start: NaiveDate, days: u32 },
    /// 추정 모선 수가 표현 범위를 벗어남
    #[error("estimated bus count {value} is out of range")]
    BusCountOutOfRange { value: f64 },
}

/// 한 번의 견적 계산에 필요한 모든 입력. 계산 중에는 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    /// IT 부하 [MW]
    pub it_capacity_mw: f64,
    /// 기계설비 부하 [MW]
    pub mechanical_load_mw: f64,
    /// 소내/보조 부하 [MW]
    pub house_load_mw: f64,
    pub tier: Tier,
    pub delivery_type: DeliveryType,
    pub report_format: ReportFormat,
    /// 선택된 스터디. 비어 있어도 된다.
    #[serde(default)]
    pub selected_studies: BTreeSet<StudyKind>,
    #[serde(default)]
    pub client_meetings_count: u32,
    /// 마진 [%]. 상한은 두지 않는다.
    #[serde(default)]
    pub margin_percent: f64,
    pub start_date: NaiveDate,
    /// 모선 밀도 보정 배수 (기본 1.0)
    #[serde(default = "default_calibration")]
    pub bus_per_mw_calibration: f64,
    /// 긴급 납기 비용 배수 (기본 1.3)
    #[serde(default = "default_urgency_multiplier")]
    pub urgency_cost_multiplier: f64,
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

fn default_calibration() -> f64 {
    1.0
}

fn default_urgency_multiplier() -> f64 {
    DEFAULT_URGENCY_COST_MULTIPLIER
}

/// UI 가드레일 범위. 엔진에서 강제하지 않고 경고로만 사용한다.
pub const IT_CAPACITY_RANGE_MW: (f64, f64) = (0.1, 100.0);
pub const MECHANICAL_LOAD_RANGE_MW: (f64, f64) = (0.1, 50.0);
pub const HOUSE_LOAD_RANGE_MW: (f64, f64) = (0.1, 20.0);
pub const MEETINGS_MAX: u32 = 10;
pub const MARGIN_RANGE_PERCENT: (f64, f64) = (0.0, 30.0);

impl ProjectInputs {
    /// 대시보드 기본값(5/2/0.5 MW, Tier III, 상세 보고서, 전 스터디, 회의 2회, 마진 15%)으로 생성한다.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            project_name: default_project_name(),
            client_name: None,
            it_capacity_mw: 5.0,
            mechanical_load_mw: 2.0,
            house_load_mw: 0.5,
            tier: Tier::III,
            delivery_type: DeliveryType::Standard,
            report_format: ReportFormat::DetailedWithAppendices,
            selected_studies: StudyKind::ALL.into_iter().collect(),
            client_meetings_count: 2,
            margin_percent: 15.0,
            start_date,
            bus_per_mw_calibration: default_calibration(),
            urgency_cost_multiplier: default_urgency_multiplier(),
        }
    }

    /// 총 부하 [MW]
    pub fn total_load_mw(&self) -> f64 {
        self.it_capacity_mw + self.mechanical_load_mw + self.house_load_mw
    }

    /// 긴급 납기일 때만 비용 배수를 적용한다.
    pub fn effective_urgency_multiplier(&self) -> f64 {
        match self.delivery_type {
            DeliveryType::Urgent => self.urgency_cost_multiplier,
            DeliveryType::Standard => 1.0,
        }
    }

    /// 계산 전에 입력값을 검증한다. 0은 허용하고 음수/NaN/무한대만 거부한다.
    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("it_capacity_mw", self.it_capacity_mw),
            ("mechanical_load_mw", self.mechanical_load_mw),
            ("house_load_mw", self.house_load_mw),
            ("margin_percent", self.margin_percent),
            ("bus_per_mw_calibration", self.bus_per_mw_calibration),
            ("urgency_cost_multiplier", self.urgency_cost_multiplier),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(InputError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// 대시보드 입력 범위를 벗어난 항목에 대한 경고 메시지를 모은다.
    pub fn guardrail_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let ranges = [
            ("IT capacity", self.it_capacity_mw, IT_CAPACITY_RANGE_MW),
            ("Mechanical load", self.mechanical_load_mw, MECHANICAL_LOAD_RANGE_MW),
            ("House load", self.house_load_mw, HOUSE_LOAD_RANGE_MW),
        ];
        for (label, value, (lo, hi)) in ranges {
            if value < lo || value > hi {
                warnings.push(format!(
                    "{label} {value} MW is outside the usual range {lo}–{hi} MW"
                ));
            }
        }
        if self.client_meetings_count > MEETINGS_MAX {
            warnings.push(format!(
                "{} client meetings exceeds the usual maximum of {MEETINGS_MAX}",
                self.client_meetings_count
            ));
        }
        let (lo, hi) = MARGIN_RANGE_PERCENT;
        if self.margin_percent < lo || self.margin_percent > hi {
            warnings.push(format!(
                "Margin {}% is outside the usual range {lo}–{hi}%",
                self.margin_percent
            ));
        }
        if self.total_load_mw() <= 0.0 {
            warnings.push("Total load is zero; no buses will be estimated".into());
        }
        warnings
    }
}
