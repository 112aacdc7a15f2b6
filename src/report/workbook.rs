//! 3개 시트(Project Summary, Studies Breakdown, Project Timeline)로 구성된 워크북 뷰.
//!
//! 셀은 원래 수치를 그대로 들고 있고 표시 문자열은 출력할 때 만든다.
//! 실제 xlsx 바이트 배치는 외부 싱크의 몫이며, 여기서는 시트별 CSV로 내보낸다.
//! 인쇄용 머리글/바닥글(`page_header`, `page_footer`)은 CSV에 담지 않고 외부 싱크에 넘긴다.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::StaffLevel;
use crate::pricing::ProjectResult;
use crate::report::format::{format_date, format_hours, format_inr, parse_inr};
use crate::report::{ReportError, Table, CONFIDENTIAL_FOOTER, REPORT_TITLE};

pub const SUMMARY_SHEET: &str = "Project Summary";
pub const STUDIES_SHEET: &str = "Studies Breakdown";
pub const TIMELINE_SHEET: &str = "Project Timeline";

/// 시트 셀
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Hours(f64),
    Currency(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => v.to_string(),
            Cell::Integer(v) => v.to_string(),
            Cell::Hours(v) => format_hours(*v),
            Cell::Currency(v) => format_inr(*v),
            Cell::Date(d) => format_date(*d),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// 인쇄 시 머리글
    pub page_header: String,
    /// 인쇄 시 바닥글
    pub page_footer: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            page_header: REPORT_TITLE.to_string(),
            page_footer: CONFIDENTIAL_FOOTER.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn to_table(&self) -> Table {
        Table {
            headers: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(Cell::display).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_result(result: &ProjectResult) -> Self {
        Self {
            sheets: vec![
                summary_sheet(result),
                studies_sheet(result),
                timeline_sheet(result),
            ],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// 시트마다 `<stem>_<시트이름>.csv` 파일을 쓴다.
    pub fn write_csv_sheets(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            let path = dir.join(format!("{stem}_{}.csv", sheet.name.replace(' ', "_")));
            fs::write(&path, sheet.to_table().to_csv()?)?;
            info!(sheet = %sheet.name, path = %path.display(), "workbook sheet written");
            written.push(path);
        }
        Ok(written)
    }
}

fn summary_sheet(result: &ProjectResult) -> Sheet {
    let info = &result.info;
    let costs = &result.costs;
    let mut sheet = Sheet::new(SUMMARY_SHEET, &["Parameter", "Value"]);
    let rows = [
        ("Project Name", Cell::text(&info.name)),
        ("Client Name", Cell::text(info.client_label())),
        ("Start Date", Cell::Date(result.timeline.start_date)),
        ("End Date", Cell::Date(result.timeline.end_date)),
        (
            "Duration (Days)",
            Cell::Integer(i64::from(result.timeline.duration_days)),
        ),
        ("IT Capacity (MW)", Cell::Number(info.it_capacity_mw)),
        ("Mechanical Load (MW)", Cell::Number(info.mechanical_load_mw)),
        ("House Load (MW)", Cell::Number(info.house_load_mw)),
        ("Total Load (MW)", Cell::Number(info.total_load_mw)),
        ("Tier Level", Cell::text(info.tier.label())),
        ("Delivery Type", Cell::text(info.delivery_type.label())),
        ("Report Format", Cell::text(info.report_format.label())),
        ("Estimated Buses", Cell::Integer(i64::from(info.estimated_buses))),
        ("Total Hours", Cell::Hours(costs.total_hours)),
        ("Total Study Cost", Cell::Currency(costs.total_study_cost)),
        ("Meeting Cost", Cell::Currency(costs.meeting_cost)),
        ("Report Cost", Cell::Currency(costs.report_cost)),
        ("Subtotal", Cell::Currency(costs.subtotal)),
        ("Margin (%)", Cell::Number(info.margin_percent)),
        ("Margin Amount", Cell::Currency(costs.margin_amount)),
        ("Total Project Cost", Cell::Currency(costs.total_cost)),
    ];
    for (label, value) in rows {
        sheet.rows.push(vec![Cell::text(label), value]);
    }
    sheet
}

const STUDY_COLUMNS: [&str; 10] = [
    "Study",
    "Complexity",
    "Hours",
    "Senior Hours",
    "Mid Hours",
    "Junior Hours",
    "Senior Cost",
    "Mid Cost",
    "Junior Cost",
    "Total Cost",
];

fn studies_sheet(result: &ProjectResult) -> Sheet {
    let mut sheet = Sheet::new(STUDIES_SHEET, &STUDY_COLUMNS);
    for study in &result.studies {
        let mut row = vec![
            Cell::text(study.name()),
            Cell::text(&study.complexity),
            Cell::Hours(study.hours),
        ];
        row.extend(StaffLevel::ALL.map(|l| Cell::Hours(study.hours_for(l))));
        row.extend(StaffLevel::ALL.map(|l| Cell::Currency(study.cost_for(l))));
        row.push(Cell::Currency(study.total_cost));
        sheet.rows.push(row);
    }
    sheet
}

fn timeline_sheet(result: &ProjectResult) -> Sheet {
    let mut sheet = Sheet::new(
        TIMELINE_SHEET,
        &["Phase", "Start Date", "End Date", "Duration (Days)"],
    );
    for phase in &result.timeline.phases {
        sheet.rows.push(vec![
            Cell::text(&phase.name),
            Cell::Date(phase.start_date),
            Cell::Date(phase.end_date),
            Cell::Integer(i64::from(phase.duration_days)),
        ]);
    }
    sheet
}

/// Studies Breakdown 시트에서 다시 읽어낸 수치 (표시 반올림 적용 상태)
#[derive(Debug, Clone, PartialEq)]
pub struct StudyFigures {
    pub name: String,
    pub hours: f64,
    pub total_cost: f64,
}

/// CSV 등으로 내보낸 Studies Breakdown 표를 다시 수치로 읽는다.
pub fn read_studies_table(table: &Table) -> Result<Vec<StudyFigures>, ReportError> {
    let malformed = |row: usize, reason: String| ReportError::Malformed {
        table: STUDIES_SHEET.to_string(),
        row,
        reason,
    };
    let column = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| malformed(0, format!("missing column '{name}'")))
    };
    let name_col = column("Study")?;
    let hours_col = column("Hours")?;
    let cost_col = column("Total Cost")?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| -> Result<StudyFigures, ReportError> {
            let row_no = idx + 1;
            let cell = |col: usize| {
                row.get(col)
                    .ok_or_else(|| malformed(row_no, format!("missing cell {col}")))
            };
            let hours_text = cell(hours_col)?;
            let hours = hours_text
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed(row_no, format!("bad hours '{hours_text}'")))?;
            let cost_text = cell(cost_col)?;
            let total_cost = parse_inr(cost_text)
                .ok_or_else(|| malformed(row_no, format!("bad cost '{cost_text}'")))?;
            Ok(StudyFigures {
                name: cell(name_col)?.clone(),
                hours,
                total_cost,
            })
        })
        .collect()
}
