//! 요약 CSV 표. 총시간은 대시보드와 같이 정수 시간으로 표시하고,
//! 워크북과 문서 뷰는 소수 첫째 자리까지 표시한다.

use chrono::NaiveDateTime;

use crate::catalog::{StaffLevel, MEETING_COST_PER_MEETING};
use crate::pricing::ProjectResult;
use crate::report::format::{
    format_date, format_hours, format_inr, format_percent, format_whole_hours,
};
use crate::report::Table;

/// 빠른 요약: 총비용, 총시간, 기간, 스터디 수, 모선 수
pub fn quick_summary(result: &ProjectResult) -> Table {
    let mut table = Table::new(["Item", "Value"]);
    table.push_row(["Total Cost".to_string(), format_inr(result.costs.total_cost)]);
    table.push_row([
        "Total Hours".to_string(),
        format_whole_hours(result.costs.total_hours),
    ]);
    table.push_row([
        "Duration".to_string(),
        format!("{} days", result.timeline.duration_days),
    ]);
    table.push_row(["Studies".to_string(), result.studies.len().to_string()]);
    table.push_row(["Buses".to_string(), result.estimated_buses().to_string()]);
    table
}

/// 전체 보고서(Parameter, Value) 표. 생성 시각은 호출자가 넘겨준다.
pub fn complete_report(
    result: &ProjectResult,
    generated_by: &str,
    generated_on: NaiveDateTime,
) -> Table {
    let info = &result.info;
    let costs = &result.costs;
    let timeline = &result.timeline;

    let rows: [(&str, String); 21] = [
        ("Project Name", info.name.clone()),
        ("Client Name", info.client_label().to_string()),
        ("Start Date", format_date(timeline.start_date)),
        ("End Date", format_date(timeline.end_date)),
        ("Duration (Days)", timeline.duration_days.to_string()),
        ("IT Capacity (MW)", info.it_capacity_mw.to_string()),
        ("Mechanical Load (MW)", info.mechanical_load_mw.to_string()),
        ("House Load (MW)", info.house_load_mw.to_string()),
        ("Total Load (MW)", info.total_load_mw.to_string()),
        ("Tier Level", info.tier.to_string()),
        ("Delivery Type", info.delivery_type.to_string()),
        ("Estimated Buses", info.estimated_buses.to_string()),
        ("Total Study Cost", format_inr(costs.total_study_cost)),
        ("Meeting Cost", format_inr(costs.meeting_cost)),
        ("Report Cost", format_inr(costs.report_cost)),
        ("Margin Amount", format_inr(costs.margin_amount)),
        ("Total Project Cost", format_inr(costs.total_cost)),
        ("Total Hours", format_whole_hours(costs.total_hours)),
        ("Studies Selected", result.studies.len().to_string()),
        ("Generated By", generated_by.to_string()),
        (
            "Generated On",
            generated_on.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    ];

    let mut table = Table::new(["Parameter", "Value"]);
    for (label, value) in rows {
        table.push_row([label.to_string(), value]);
    }
    table
}

/// 추가 비용 항목(회의, 보고서, 마진)
#[derive(Debug, Clone, PartialEq)]
pub struct CostComponent {
    pub title: &'static str,
    pub detail: String,
    pub amount: f64,
}

pub fn additional_costs(result: &ProjectResult) -> [CostComponent; 3] {
    let info = &result.info;
    [
        CostComponent {
            title: "Client Meetings",
            detail: format!(
                "{} meetings × {}",
                info.client_meetings_count,
                format_inr(MEETING_COST_PER_MEETING)
            ),
            amount: result.costs.meeting_cost,
        },
        CostComponent {
            title: "Report Preparation",
            detail: info.report_format.to_string(),
            amount: result.costs.report_cost,
        },
        CostComponent {
            title: "Profit Margin",
            detail: format!("{} on subtotal", format_percent(info.margin_percent)),
            amount: result.costs.margin_amount,
        },
    ]
}

/// 인력 등급별 투입 시간 표
pub fn resource_allocation(result: &ProjectResult) -> Table {
    let mut table = Table::new(["Level", "Hours", "Share"]);
    for (level, hours) in result.resource_allocation() {
        table.push_row([
            plural_title(level),
            format_hours(hours),
            format!("{:.0}%", level.allocation() * 100.0),
        ]);
    }
    table
}

fn plural_title(level: StaffLevel) -> String {
    match level {
        StaffLevel::Senior => "Senior Engineers".to_string(),
        StaffLevel::Mid => "Mid-level Engineers".to_string(),
        StaffLevel::Junior => "Junior Engineers".to_string(),
    }
}
