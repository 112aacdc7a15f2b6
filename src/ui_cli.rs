//! 견적 결과를 터미널에 출력한다.

use crate::catalog::{
    ReportFormat, StaffLevel, StudyKind, Tier, BASE_REPORT_COST, MEETING_COST_PER_MEETING,
};
use crate::pricing::ProjectResult;
use crate::report::breakdown::study_breakdown;
use crate::report::format::{
    format_date, format_hours, format_inr, format_percent, format_whole_hours,
};
use crate::report::summary::{additional_costs, resource_allocation};
use crate::report::{Table, NO_STUDIES_MESSAGE};

fn print_table(table: &Table) {
    let widths: Vec<usize> = (0..table.headers.len())
        .map(|i| {
            std::iter::once(&table.headers)
                .chain(&table.rows)
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c}{}", " ".repeat(w.saturating_sub(c.chars().count()))))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("{}", line(table.headers.as_slice()));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &table.rows {
        println!("{}", line(row.as_slice()));
    }
}

/// 견적 결과 전체를 출력한다.
pub fn print_result(result: &ProjectResult) {
    let costs = &result.costs;
    let info = &result.info;

    println!("\n=== Cost Analysis Results: {} ===", info.name);
    println!(
        "Total Cost: {}  (+{} margin)",
        format_inr(costs.total_cost),
        format_percent(info.margin_percent)
    );
    println!(
        "Total Hours: {}  ({} studies)",
        format_whole_hours(costs.total_hours),
        result.studies.len()
    );
    println!("Duration: {} days", result.timeline.duration_days);
    println!("Buses: {} estimated", info.estimated_buses);

    println!("\n-- Study-wise Breakdown --");
    if result.has_studies() {
        for study in &result.studies {
            println!(
                "{} [{}] {} h (Sr: {}, Mid: {}, Jr: {})  {}",
                study.name(),
                study.complexity,
                format_hours(study.hours),
                format_hours(study.senior_hours),
                format_hours(study.mid_hours),
                format_hours(study.junior_hours),
                format_inr(study.total_cost)
            );
        }
        println!();
        print_table(&study_breakdown(result, true));
    } else {
        println!("{NO_STUDIES_MESSAGE}");
    }

    println!("\n-- Additional Cost Components --");
    for component in additional_costs(result) {
        println!(
            "{}: {}  {}",
            component.title,
            component.detail,
            format_inr(component.amount)
        );
    }

    println!("\n-- Project Timeline --");
    println!("Start Date: {}", format_date(result.timeline.start_date));
    println!("End Date: {}", format_date(result.timeline.end_date));
    println!("Duration: {} days", result.timeline.duration_days);
    println!("Delivery Type: {}", info.delivery_type);
    for phase in &result.timeline.phases {
        println!(
            "  {} {} → {} ({} days)",
            phase.name,
            format_date(phase.start_date),
            format_date(phase.end_date),
            phase.duration_days
        );
    }

    println!("\n-- Resource Allocation --");
    print_table(&resource_allocation(result));
}

/// 계산 방법과 요율표를 출력한다.
pub fn print_catalog() {
    println!("\n=== Calculation Methodology ===");
    println!("Study_Cost = Bus_Count × Base_Hours_per_Bus × Tier_Complexity_Factor × Rate_Structure");
    println!("Total_Project_Cost = (Study_Costs + Additional_Costs) × (1 + Margin%)");

    println!("\n-- Rate Structure --");
    for level in StaffLevel::ALL {
        println!(
            "{}: {}/hour ({:.0}% allocation)",
            level.title(),
            format_inr(level.hourly_rate()),
            level.allocation() * 100.0
        );
    }

    println!("\n-- Study Factors --");
    for kind in StudyKind::ALL {
        println!(
            "{}: {} hours/bus ({} complexity)",
            kind.display_name(),
            kind.base_hours_per_bus(),
            kind.complexity_label()
        );
    }

    println!("\n-- Tier Multipliers --");
    for tier in Tier::ALL {
        println!(
            "{}: {}x complexity, {} buses/MW",
            tier,
            tier.complexity_factor(),
            tier.bus_density_per_mw()
        );
    }

    println!("\n-- Additional Costs --");
    println!("Client Meetings: {} per meeting", format_inr(MEETING_COST_PER_MEETING));
    for report in [
        ReportFormat::Basic,
        ReportFormat::DetailedWithAppendices,
        ReportFormat::ClientBranded,
    ] {
        println!(
            "{}: {} × {} = {}",
            report,
            format_inr(BASE_REPORT_COST),
            report.cost_multiplier(),
            format_inr(BASE_REPORT_COST * report.cost_multiplier())
        );
    }
}
