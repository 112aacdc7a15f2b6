use crate::catalog::StaffLevel;
use crate::pricing::ProjectResult;
use crate::report::format::{format_hours, format_inr};
use crate::report::Table;

/// 스터디별 내역 표. `per_tier`가 참이면 등급별 시간/비용 열을 덧붙인다.
/// 선택된 스터디가 없으면 머리행만 있는 빈 표를 돌려준다.
pub fn study_breakdown(result: &ProjectResult, per_tier: bool) -> Table {
    let mut headers: Vec<String> = ["Study", "Complexity", "Hours", "Cost"]
        .into_iter()
        .map(String::from)
        .collect();
    if per_tier {
        for level in StaffLevel::ALL {
            headers.push(format!("{} Hours", level.short_label()));
        }
        for level in StaffLevel::ALL {
            headers.push(format!("{} Cost", level.short_label()));
        }
    }

    let mut table = Table::new(headers);
    for study in &result.studies {
        let mut row = vec![
            study.name().to_string(),
            study.complexity.clone(),
            format_hours(study.hours),
            format_inr(study.total_cost),
        ];
        if per_tier {
            row.extend(StaffLevel::ALL.map(|l| format_hours(study.hours_for(l))));
            row.extend(StaffLevel::ALL.map(|l| format_inr(study.cost_for(l))));
        }
        table.push_row(row);
    }
    table
}
