use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pricing::ProjectResult;
use crate::report::breakdown::study_breakdown;
use crate::report::document::Document;
use crate::report::summary::{complete_report, quick_summary};
use crate::report::workbook::Workbook;
use crate::report::{ensure_finite, ReportError};

/// 내보낼 수 있는 출력 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    QuickSummary,
    StudyBreakdown,
    CompleteReport,
    Workbook,
    Document,
}

impl ExportKind {
    pub const ALL: [ExportKind; 5] = [
        ExportKind::QuickSummary,
        ExportKind::StudyBreakdown,
        ExportKind::CompleteReport,
        ExportKind::Workbook,
        ExportKind::Document,
    ];
}

impl FromStr for ExportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "quick" | "quick_summary" => Ok(ExportKind::QuickSummary),
            "breakdown" | "study_breakdown" => Ok(ExportKind::StudyBreakdown),
            "complete" | "complete_report" => Ok(ExportKind::CompleteReport),
            "workbook" | "xlsx" => Ok(ExportKind::Workbook),
            "document" | "pdf" => Ok(ExportKind::Document),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// 어떤 출력을 만들지 고르는 선택 플래그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSelection {
    pub quick_summary: bool,
    pub study_breakdown: bool,
    pub complete_report: bool,
    pub workbook: bool,
    pub document: bool,
}

impl ExportSelection {
    pub fn all() -> Self {
        Self::from_kinds(ExportKind::ALL)
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = ExportKind>) -> Self {
        let mut selection = Self::default();
        for kind in kinds {
            selection.enable(kind);
        }
        selection
    }

    pub fn enable(&mut self, kind: ExportKind) {
        match kind {
            ExportKind::QuickSummary => self.quick_summary = true,
            ExportKind::StudyBreakdown => self.study_breakdown = true,
            ExportKind::CompleteReport => self.complete_report = true,
            ExportKind::Workbook => self.workbook = true,
            ExportKind::Document => self.document = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 파일 출력에 필요한 부가 정보
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub generated_on: NaiveDateTime,
    pub generated_by: String,
    pub lines_per_page: usize,
}

fn file_stamp(generated_on: NaiveDateTime) -> String {
    generated_on.format("%Y%m%d_%H%M").to_string()
}

/// 파일 이름에 쓸 수 있도록 ASCII 영숫자, `-`, `_` 외의 문자는 모두 `_`로 바꾼다.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn complete_report_file_name(project_name: &str, generated_on: NaiveDateTime) -> String {
    format!(
        "DC_Complete_Report_{}_{}.csv",
        file_safe(project_name),
        file_stamp(generated_on)
    )
}

pub fn quick_summary_file_name(generated_on: NaiveDateTime) -> String {
    format!("DC_Quick_Summary_{}.csv", file_stamp(generated_on))
}

pub fn study_breakdown_file_name(generated_on: NaiveDateTime) -> String {
    format!("DC_Study_Breakdown_{}.csv", file_stamp(generated_on))
}

pub fn workbook_stem(generated_on: NaiveDateTime) -> String {
    format!("DC_Workbook_{}", file_stamp(generated_on))
}

pub fn document_file_name(generated_on: NaiveDateTime) -> String {
    format!("DC_Report_{}.txt", file_stamp(generated_on))
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, ReportError> {
    fs::write(&path, contents)?;
    info!(path = %path.display(), "report written");
    Ok(path)
}

/// 선택된 출력 파일을 모두 쓰고 경로 목록을 돌려준다.
///
/// 스터디가 하나도 없으면 스터디 내역 CSV는 건너뛴다. 실패해도 `result`는 그대로 유효하다.
pub fn export_all(
    result: &ProjectResult,
    selection: ExportSelection,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ReportError> {
    ensure_finite(result)?;
    let dir: &Path = &options.output_dir;
    fs::create_dir_all(dir)?;
    let at = options.generated_on;
    let mut written = Vec::new();

    if selection.complete_report {
        let table = complete_report(result, &options.generated_by, at);
        let path = dir.join(complete_report_file_name(&result.info.name, at));
        written.push(write_file(path, &table.to_csv()?)?);
    }
    if selection.quick_summary {
        let path = dir.join(quick_summary_file_name(at));
        written.push(write_file(path, &quick_summary(result).to_csv()?)?);
    }
    if selection.study_breakdown {
        if result.has_studies() {
            let path = dir.join(study_breakdown_file_name(at));
            written.push(write_file(path, &study_breakdown(result, false).to_csv()?)?);
        } else {
            info!("no studies selected, study breakdown skipped");
        }
    }
    if selection.workbook {
        let workbook = Workbook::from_result(result);
        written.extend(workbook.write_csv_sheets(dir, &workbook_stem(at))?);
    }
    if selection.document {
        let document = Document::from_result(result, at)?;
        let path = dir.join(document_file_name(at));
        written.push(write_file(path, &document.to_text(options.lines_per_page))?);
    }
    Ok(written)
}
