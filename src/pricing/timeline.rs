use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{DeliveryType, ENGINEERING_HOURS_PER_DAY, MIN_BASE_DURATION_DAYS};
use crate::pricing::inputs::InputError;

/// 단계 구성: 이름, 전체 일정 대비 비율, 최소 일수
#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub name: &'static str,
    pub fraction: f64,
    pub min_days: u32,
}

pub const PHASE_PLAN: [PhaseSpec; 6] = [
    PhaseSpec {
        name: "Project Initiation",
        fraction: 0.10,
        min_days: 1,
    },
    PhaseSpec {
        name: "Data Collection",
        fraction: 0.15,
        min_days: 2,
    },
    PhaseSpec {
        name: "System Modeling",
        fraction: 0.25,
        min_days: 3,
    },
    PhaseSpec {
        name: "Study Execution",
        fraction: 0.35,
        min_days: 5,
    },
    PhaseSpec {
        name: "Review & QA",
        fraction: 0.10,
        min_days: 2,
    },
    PhaseSpec {
        name: "Report Preparation",
        fraction: 0.05,
        min_days: 1,
    },
];

/// 일정 단계. `end_date`는 다음 단계의 `start_date`와 같다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub phases: Vec<Phase>,
}

/// 총 스터디 시간으로부터 일정(일)을 계산한다.
/// `ceil(max(4, hours / 8) × 압축계수)`
pub fn timeline_days(total_study_hours: f64, delivery: DeliveryType) -> u32 {
    let base = (total_study_hours / ENGINEERING_HOURS_PER_DAY).max(MIN_BASE_DURATION_DAYS);
    (base * delivery.schedule_factor()).ceil() as u32
}

fn add_days(start: NaiveDate, days: u32) -> Result<NaiveDate, InputError> {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or(InputError::DateOutOfRange { start, days })
}

/// 전체 일정을 단계별로 순차 배치한다. 단계별 최소 일수가 있어 합계가 전체 일정보다 길어질 수 있다.
pub fn plan_phases(start: NaiveDate, total_days: u32) -> Result<Vec<Phase>, InputError> {
    let mut cursor = start;
    let mut phases = Vec::with_capacity(PHASE_PLAN.len());
    for spec in PHASE_PLAN {
        let share = (f64::from(total_days) * spec.fraction).round() as u32;
        let duration_days = share.max(spec.min_days);
        let end_date = add_days(cursor, duration_days)?;
        phases.push(Phase {
            name: spec.name.to_string(),
            start_date: cursor,
            end_date,
            duration_days,
        });
        cursor = end_date;
    }
    Ok(phases)
}

pub fn build_timeline(
    start_date: NaiveDate,
    total_study_hours: f64,
    delivery: DeliveryType,
) -> Result<Timeline, InputError> {
    let duration_days = timeline_days(total_study_hours, delivery);
    Ok(Timeline {
        start_date,
        end_date: add_days(start_date, duration_days)?,
        duration_days,
        phases: plan_phases(start_date, duration_days)?,
    })
}
