//! 고정 페이지 크기 문서 뷰. 제목, 프로젝트 정보 표, 스터디 표, 면책 문단으로 구성한다.
//! PDF 바이트 배치는 외부 렌더러의 몫이며, 여기서는 페이지 단위 텍스트로 렌더링한다.

use chrono::NaiveDateTime;

use crate::pricing::ProjectResult;
use crate::report::breakdown::study_breakdown;
use crate::report::format::{format_date, format_hours, format_inr, format_percent};
use crate::report::{
    ensure_finite, ReportError, Table, CONFIDENTIAL_FOOTER, NO_STUDIES_MESSAGE, REPORT_TITLE,
};

pub const DISCLAIMER: &str = "Bus count estimation: this estimate focuses on the cost of power system \
studies. Bus counts are derived from a load-density approximation for costing purposes only and \
should be replaced by a detailed single-line-diagram count when available. Professional use: results \
are estimates based on industry rates and must be validated by qualified electrical engineers before \
being used for actual project implementation.";

const TEXT_WIDTH: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
}

pub const A4: PageSize = PageSize {
    name: "A4",
    width_mm: 210.0,
    height_mm: 297.0,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title { title: String, subtitle: String },
    Heading(String),
    KeyValue(Vec<(String, String)>),
    Table(Table),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_size: PageSize,
    pub blocks: Vec<Block>,
}

impl Document {
    /// 결과에 NaN/무한대가 있으면 문서를 만들지 않고 오류를 돌려준다.
    pub fn from_result(
        result: &ProjectResult,
        generated_on: NaiveDateTime,
    ) -> Result<Self, ReportError> {
        ensure_finite(result)?;
        let info = &result.info;
        let costs = &result.costs;
        let timeline = &result.timeline;

        let project_rows: Vec<(String, String)> = [
            ("Project Name", info.name.clone()),
            ("Client", info.client_label().to_string()),
            ("Start Date", format_date(timeline.start_date)),
            ("End Date", format_date(timeline.end_date)),
            ("Duration", format!("{} days", timeline.duration_days)),
            ("Total Load", format!("{} MW", info.total_load_mw)),
            ("Tier Level", info.tier.to_string()),
            ("Delivery Type", info.delivery_type.to_string()),
            ("Report Format", info.report_format.to_string()),
            ("Estimated Buses", info.estimated_buses.to_string()),
            ("Total Hours", format_hours(costs.total_hours)),
            ("Study Cost", format_inr(costs.total_study_cost)),
            ("Meeting Cost", format_inr(costs.meeting_cost)),
            ("Report Cost", format_inr(costs.report_cost)),
            ("Subtotal", format_inr(costs.subtotal)),
            (
                "Margin",
                format!(
                    "{} ({})",
                    format_inr(costs.margin_amount),
                    format_percent(info.margin_percent)
                ),
            ),
            ("Total Project Cost", format_inr(costs.total_cost)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let studies = if result.has_studies() {
            Block::Table(study_breakdown(result, false))
        } else {
            Block::Paragraph(NO_STUDIES_MESSAGE.to_string())
        };

        Ok(Self {
            page_size: A4,
            blocks: vec![
                Block::Title {
                    title: "Data Center Power System Studies".to_string(),
                    subtitle: format!(
                        "Cost Estimate for {} (generated {})",
                        info.name,
                        generated_on.format("%Y-%m-%d %H:%M")
                    ),
                },
                Block::Heading("Project Information".to_string()),
                Block::KeyValue(project_rows),
                Block::Heading("Studies Breakdown".to_string()),
                studies,
                Block::Heading("Disclaimer".to_string()),
                Block::Paragraph(DISCLAIMER.to_string()),
            ],
        })
    }

    /// 페이지별 줄 목록. 각 페이지는 머리글, 본문, 바닥글(쪽 번호 포함) 순이다.
    pub fn render_pages(&self, lines_per_page: usize) -> Vec<Vec<String>> {
        let body_lines = lines_per_page.saturating_sub(4).max(1);
        let mut bodies: Vec<Vec<String>> = vec![Vec::new()];
        for block in &self.blocks {
            let mut lines = render_block(block);
            lines.push(String::new());
            let used = bodies.last().map_or(0, Vec::len);
            if used > 0 && lines.len() <= body_lines && used + lines.len() > body_lines {
                bodies.push(Vec::new());
            }
            for line in lines {
                push_line(&mut bodies, line, body_lines);
            }
        }

        let total = bodies.len();
        bodies
            .into_iter()
            .enumerate()
            .map(|(idx, body)| {
                let mut page = Vec::with_capacity(body.len() + 4);
                page.push(REPORT_TITLE.to_string());
                page.push(String::new());
                page.extend(body);
                page.push(String::new());
                page.push(format!("{CONFIDENTIAL_FOOTER} | Page {} of {total}", idx + 1));
                page
            })
            .collect()
    }

    /// 페이지 사이를 폼피드 문자로 구분한 텍스트
    pub fn to_text(&self, lines_per_page: usize) -> String {
        self.render_pages(lines_per_page)
            .into_iter()
            .map(|page| page.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\u{000C}\n")
    }
}

/// 빈 줄은 페이지 맨 위에 두지 않는다.
fn push_line(bodies: &mut Vec<Vec<String>>, line: String, body_lines: usize) {
    let full = bodies.last().map_or(true, |b| b.len() >= body_lines);
    let fresh = bodies.last().map_or(true, Vec::is_empty);
    if line.is_empty() && (full || fresh) {
        return;
    }
    if full {
        bodies.push(Vec::new());
    }
    if let Some(body) = bodies.last_mut() {
        body.push(line);
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(s))));
    out
}

fn render_block(block: &Block) -> Vec<String> {
    match block {
        Block::Title { title, subtitle } => {
            let rule = "=".repeat(width(title).max(width(subtitle)));
            vec![title.clone(), subtitle.clone(), rule]
        }
        Block::Heading(text) => vec![text.clone(), "-".repeat(width(text))],
        Block::KeyValue(rows) => {
            let key_width = rows.iter().map(|(k, _)| width(k)).max().unwrap_or(0);
            rows.iter()
                .map(|(k, v)| format!("{}  {v}", pad(k, key_width)))
                .collect()
        }
        Block::Table(table) => render_table(table),
        Block::Paragraph(text) => wrap(text, TEXT_WIDTH),
    }
}

fn render_table(table: &Table) -> Vec<String> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| width(h)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell));
            }
        }
    }
    let render_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };
    let mut lines = vec![render_row(table.headers.as_slice())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(table.rows.iter().map(|row| render_row(row.as_slice())));
    lines
}

fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && width(&current) + 1 + width(word) > max {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
