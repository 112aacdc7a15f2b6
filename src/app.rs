use std::collections::BTreeSet;
use std::fs;

use chrono::{Local, NaiveDate};
use tracing::{error, warn};

use crate::catalog::{self, CatalogError, StudyKind};
use crate::cli::{Cli, Command, EstimateArgs};
use crate::config::{self, ConfigError, EstimatorConfig};
use crate::pricing::{self, InputError, ProjectInputs};
use crate::report::export::{export_all, ExportOptions, ExportSelection};
use crate::report::ReportError;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 카탈로그 상수 오류
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// 입력값 검증 오류
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    /// 입력 파일 파싱 오류
    #[error("inputs file parse error: {0}")]
    InputsFile(#[from] toml::de::Error),
    /// 출력 오류. 이미 계산된 견적은 유효하다.
    #[error("export failed: {0}")]
    Report(#[from] ReportError),
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    catalog::verify_rate_allocations()?;
    let cfg = config::load_or_default(&cli.config)?;
    match cli.command {
        Command::Estimate(args) => estimate(&cfg, &args),
        Command::Catalog => {
            ui_cli::print_catalog();
            Ok(())
        }
    }
}

/// 설정과 CLI 인자를 합쳐 견적 입력을 만든다. 인자가 설정보다 우선한다.
pub fn build_inputs(
    cfg: &EstimatorConfig,
    args: &EstimateArgs,
    today: NaiveDate,
) -> Result<ProjectInputs, AppError> {
    if let Some(path) = &args.inputs {
        let content = fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let selected_studies: BTreeSet<StudyKind> = if args.no_studies {
        BTreeSet::new()
    } else {
        match &args.studies {
            Some(kinds) => kinds.iter().copied().collect(),
            None => StudyKind::ALL.into_iter().collect(),
        }
    };

    Ok(ProjectInputs {
        project_name: args.name.clone().unwrap_or_else(|| cfg.project.name.clone()),
        client_name: args.client.clone().or_else(|| cfg.project.client.clone()),
        it_capacity_mw: args.it_capacity_mw,
        mechanical_load_mw: args.mechanical_load_mw,
        house_load_mw: args.house_load_mw,
        tier: args.tier,
        delivery_type: args.delivery,
        report_format: args.report,
        selected_studies,
        client_meetings_count: args.meetings,
        margin_percent: args.margin,
        start_date: args.start.unwrap_or(today),
        bus_per_mw_calibration: args.calibration.unwrap_or(cfg.calibration.bus_per_mw),
        urgency_cost_multiplier: args
            .urgency_multiplier
            .unwrap_or(cfg.calibration.urgency_cost_multiplier),
    })
}

fn estimate(cfg: &EstimatorConfig, args: &EstimateArgs) -> Result<(), AppError> {
    let now = Local::now().naive_local();
    let inputs = build_inputs(cfg, args, now.date())?;
    for warning in inputs.guardrail_warnings() {
        warn!("{warning}");
    }

    let result = pricing::evaluate(&inputs)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        ui_cli::print_result(&result);
    }

    let kinds = args
        .export
        .clone()
        .unwrap_or_else(|| cfg.export.formats.clone());
    let selection = ExportSelection::from_kinds(kinds);
    if selection.is_empty() {
        return Ok(());
    }

    let options = ExportOptions {
        output_dir: args
            .out
            .clone()
            .unwrap_or_else(|| cfg.export.output_dir.clone()),
        generated_on: now,
        generated_by: cfg.export.generated_by.clone(),
        lines_per_page: cfg.export.lines_per_page,
    };
    match export_all(&result, selection, &options) {
        Ok(paths) => {
            for path in paths {
                println!("Saved: {}", path.display());
            }
            Ok(())
        }
        Err(err) => {
            error!(%err, "export failed, the estimate above is unaffected");
            Err(err.into())
        }
    }
}
