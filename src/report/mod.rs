//! 견적 결과를 표/시트/문서 형태로 변환하는 출력 계층.
//! 각 변환은 서로 독립적이며 결과 값을 다시 계산하거나 변경하지 않는다.

pub mod breakdown;
pub mod document;
pub mod export;
pub mod format;
pub mod summary;
pub mod workbook;

use std::io::Read;

use crate::pricing::ProjectResult;

pub const REPORT_TITLE: &str = "Data Center Cost Estimator";
pub const CONFIDENTIAL_FOOTER: &str = "Confidential — For Professional Use Only";
pub const DEFAULT_GENERATED_BY: &str = "Data Center Power Studies Cost Estimator";
pub const NO_STUDIES_MESSAGE: &str =
    "No studies selected. Please select at least one study type.";

/// 출력 단계에서 발생 가능한 오류. 이미 계산된 견적 결과에는 영향을 주지 않는다.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// 결과에 NaN/무한대가 포함됨
    #[error("non-finite value in {0}")]
    NonFinite(String),
    /// 표를 다시 읽을 때 형식이 맞지 않음
    #[error("malformed row {row} in '{table}': {reason}")]
    Malformed {
        table: String,
        row: usize,
        reason: String,
    },
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),
}

/// 머리행과 문자열 셀로 이루어진 단순 표.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 이름이 `header`인 열 번호
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// 머리행 포함 CSV(UTF-8, 쉼표 구분) 문자열로 변환한다.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// CSV를 다시 표로 읽는다. 첫 행은 머리행으로 취급한다.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, ReportError> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }
}

/// 결과의 모든 수치가 유한한지 확인한다. 파일 출력 전에 호출한다.
pub fn ensure_finite(result: &ProjectResult) -> Result<(), ReportError> {
    let costs = &result.costs;
    let mut checks: Vec<(String, f64)> = vec![
        ("total_load_mw".into(), result.info.total_load_mw),
        ("margin_percent".into(), result.info.margin_percent),
        ("total_study_cost".into(), costs.total_study_cost),
        ("meeting_cost".into(), costs.meeting_cost),
        ("report_cost".into(), costs.report_cost),
        ("subtotal".into(), costs.subtotal),
        ("margin_amount".into(), costs.margin_amount),
        ("total_cost".into(), costs.total_cost),
        ("total_hours".into(), costs.total_hours),
    ];
    for study in &result.studies {
        checks.push((format!("{} hours", study.name()), study.hours));
        checks.push((format!("{} cost", study.name()), study.total_cost));
    }
    match checks.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(ReportError::NonFinite(field)),
        None => Ok(()),
    }
}
