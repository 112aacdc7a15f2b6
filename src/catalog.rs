//! 고정 비즈니스 상수(스터디 카탈로그, 요율표, Tier 계수, 보고서 배수)를 모아둔다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 회의 1회당 비용 [₹]
pub const MEETING_COST_PER_MEETING: f64 = 8000.0;
/// 보고서 기본 작성 비용 [₹]
pub const BASE_REPORT_COST: f64 = 15000.0;
/// 긴급 납기 시 기본 비용 배수
pub const DEFAULT_URGENCY_COST_MULTIPLIER: f64 = 1.3;
/// 하루 투입 엔지니어링 시간 [h/day]
pub const ENGINEERING_HOURS_PER_DAY: f64 = 8.0;
/// 일정 하한 [day] (압축 전)
pub const MIN_BASE_DURATION_DAYS: f64 = 4.0;
/// 일반 납기 일정 압축 계수
pub const STANDARD_SCHEDULE_FACTOR: f64 = 0.8;
/// 긴급 납기 일정 압축 계수. 비용 배수와는 별개의 값이다.
pub const URGENT_SCHEDULE_FACTOR: f64 = 0.6;

/// 카탈로그 관련 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// 인력 배분 비율의 합이 1이 아님
    #[error("staff allocation fractions sum to {0}, expected 1.0")]
    AllocationSum(f64),
    /// 알 수 없는 열거형 이름
    #[error("unknown {kind} '{value}'")]
    UnknownName { kind: &'static str, value: String },
}

fn unknown(kind: &'static str, value: &str) -> CatalogError {
    CatalogError::UnknownName {
        kind,
        value: value.to_string(),
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 데이터센터 신뢰도 등급. 순서대로 복잡도가 증가한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    I,
    II,
    III,
    IV,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::I, Tier::II, Tier::III, Tier::IV];

    /// 스터디 시간에 곱하는 복잡도 계수
    pub fn complexity_factor(self) -> f64 {
        match self {
            Tier::I => 1.0,
            Tier::II => 1.2,
            Tier::III => 1.5,
            Tier::IV => 2.0,
        }
    }

    /// 부하 1 MW당 모선(bus) 밀도
    pub fn bus_density_per_mw(self) -> f64 {
        match self {
            Tier::I => 1.5,
            Tier::II => 1.7,
            Tier::III => 2.0,
            Tier::IV => 2.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::I => "Tier I",
            Tier::II => "Tier II",
            Tier::III => "Tier III",
            Tier::IV => "Tier IV",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = CatalogError;

    /// "III", "3", "Tier III", "tier-3" 형태를 모두 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        let key = normalized
            .strip_prefix("tier")
            .unwrap_or(normalized.as_str());
        match key {
            "i" | "1" => Ok(Tier::I),
            "ii" | "2" => Ok(Tier::II),
            "iii" | "3" => Ok(Tier::III),
            "iv" | "4" => Ok(Tier::IV),
            _ => Err(unknown("tier", s)),
        }
    }
}

/// 납기 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryType {
    Standard,
    Urgent,
}

impl DeliveryType {
    /// 일정 압축 계수
    pub fn schedule_factor(self) -> f64 {
        match self {
            DeliveryType::Standard => STANDARD_SCHEDULE_FACTOR,
            DeliveryType::Urgent => URGENT_SCHEDULE_FACTOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeliveryType::Standard => "Standard",
            DeliveryType::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeliveryType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "standard" => Ok(DeliveryType::Standard),
            "urgent" => Ok(DeliveryType::Urgent),
            _ => Err(unknown("delivery type", s)),
        }
    }
}

/// 보고서 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportFormat {
    Basic,
    DetailedWithAppendices,
    ClientBranded,
}

impl ReportFormat {
    /// 기본 보고서 비용에 곱하는 배수
    pub fn cost_multiplier(self) -> f64 {
        match self {
            ReportFormat::Basic => 1.0,
            ReportFormat::DetailedWithAppendices => 1.8,
            ReportFormat::ClientBranded => 2.2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Basic => "Basic PDF",
            ReportFormat::DetailedWithAppendices => "Detailed Report with Appendices",
            ReportFormat::ClientBranded => "Client-Branded Report",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "basic" | "basicpdf" => Ok(ReportFormat::Basic),
            "detailed" | "detailedwithappendices" | "detailedreportwithappendices" => {
                Ok(ReportFormat::DetailedWithAppendices)
            }
            "clientbranded" | "branded" | "clientbrandedreport" => {
                Ok(ReportFormat::ClientBranded)
            }
            _ => Err(unknown("report format", s)),
        }
    }
}

/// 전력계통 스터디 종류. 선언 순서가 카탈로그 순서이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StudyKind {
    LoadFlow,
    ShortCircuit,
    ProtectiveDeviceCoordination,
    ArcFlash,
}

impl StudyKind {
    /// 카탈로그 순서
    pub const ALL: [StudyKind; 4] = [
        StudyKind::LoadFlow,
        StudyKind::ShortCircuit,
        StudyKind::ProtectiveDeviceCoordination,
        StudyKind::ArcFlash,
    ];

    /// 모선 1개당 기본 시간 [h/bus]
    pub fn base_hours_per_bus(self) -> f64 {
        match self {
            StudyKind::LoadFlow => 0.8,
            StudyKind::ShortCircuit => 1.0,
            StudyKind::ProtectiveDeviceCoordination => 1.5,
            StudyKind::ArcFlash => 1.2,
        }
    }

    /// 참고용 복잡도 표시
    pub fn complexity_label(self) -> &'static str {
        match self {
            StudyKind::LoadFlow => "Medium",
            StudyKind::ShortCircuit => "Medium-High",
            StudyKind::ProtectiveDeviceCoordination | StudyKind::ArcFlash => "High",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StudyKind::LoadFlow => "Load Flow Study",
            StudyKind::ShortCircuit => "Short Circuit Study",
            StudyKind::ProtectiveDeviceCoordination => "Protective Device Coordination",
            StudyKind::ArcFlash => "Arc Flash Study",
        }
    }
}

impl fmt::Display for StudyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StudyKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "lf" | "loadflow" | "loadflowstudy" => Ok(StudyKind::LoadFlow),
            "sc" | "shortcircuit" | "shortcircuitstudy" => Ok(StudyKind::ShortCircuit),
            "pdc" | "protectivedevicecoordination" => Ok(StudyKind::ProtectiveDeviceCoordination),
            "af" | "arcflash" | "arcflashstudy" => Ok(StudyKind::ArcFlash),
            _ => Err(unknown("study kind", s)),
        }
    }
}

/// 인력 등급. 시간 배분 비율과 시간당 단가를 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffLevel {
    Senior,
    Mid,
    Junior,
}

impl StaffLevel {
    pub const ALL: [StaffLevel; 3] = [StaffLevel::Senior, StaffLevel::Mid, StaffLevel::Junior];

    /// 시간당 단가 [₹/h]
    pub fn hourly_rate(self) -> f64 {
        match self {
            StaffLevel::Senior => 1200.0,
            StaffLevel::Mid => 650.0,
            StaffLevel::Junior => 350.0,
        }
    }

    /// 스터디 시간 중 해당 등급에 배분되는 비율
    pub fn allocation(self) -> f64 {
        match self {
            StaffLevel::Senior => 0.20,
            StaffLevel::Mid => 0.30,
            StaffLevel::Junior => 0.50,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StaffLevel::Senior => "Senior Engineer/Manager",
            StaffLevel::Mid => "Mid-level Engineer",
            StaffLevel::Junior => "Junior Engineer",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            StaffLevel::Senior => "Senior",
            StaffLevel::Mid => "Mid",
            StaffLevel::Junior => "Junior",
        }
    }
}

/// 인력 배분 비율 합이 1.0인지 확인한다. 프로그램 시작 시 한 번 호출한다.
pub fn verify_rate_allocations() -> Result<(), CatalogError> {
    let sum: f64 = StaffLevel::ALL.iter().map(|l| l.allocation()).sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(CatalogError::AllocationSum(sum));
    }
    Ok(())
}
