use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::catalog::{DeliveryType, ReportFormat, StudyKind, Tier};
use crate::config::DEFAULT_CONFIG_FILE;
use crate::report::export::ExportKind;

/// 데이터센터 전력계통 스터디 견적 CLI
#[derive(Debug, Parser)]
#[command(
    name = "dc_power_study_estimator",
    version,
    about = "Data center power system studies cost estimator"
)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// 로그 상세도 (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 견적을 계산하고 결과를 출력/내보낸다
    Estimate(EstimateArgs),
    /// 요율표, 스터디 계수, Tier 배수를 보여준다
    Catalog,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// 입력값 TOML 파일. 주어지면 아래 입력 인자는 무시한다.
    #[arg(long)]
    pub inputs: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    /// 시작일 (YYYY-MM-DD). 기본값은 오늘
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// IT 부하 [MW]
    #[arg(long = "it", default_value_t = 5.0)]
    pub it_capacity_mw: f64,
    /// 기계설비 부하 [MW]
    #[arg(long = "mechanical", default_value_t = 2.0)]
    pub mechanical_load_mw: f64,
    /// 소내/보조 부하 [MW]
    #[arg(long = "house", default_value_t = 0.5)]
    pub house_load_mw: f64,

    #[arg(long, default_value = "III")]
    pub tier: Tier,
    #[arg(long, default_value = "standard")]
    pub delivery: DeliveryType,
    #[arg(long, default_value = "detailed")]
    pub report: ReportFormat,
    /// 쉼표 구분 스터디 목록 (lf, sc, pdc, af). 기본값은 전체
    #[arg(long, value_delimiter = ',')]
    pub studies: Option<Vec<StudyKind>>,
    /// 스터디를 하나도 선택하지 않는다
    #[arg(long, conflicts_with = "studies")]
    pub no_studies: bool,

    #[arg(long, default_value_t = 2)]
    pub meetings: u32,
    /// 마진 [%]
    #[arg(long, default_value_t = 15.0)]
    pub margin: f64,

    /// 모선 밀도 보정 배수
    #[arg(long)]
    pub calibration: Option<f64>,
    /// 긴급 납기 비용 배수
    #[arg(long)]
    pub urgency_multiplier: Option<f64>,

    /// 쉼표 구분 출력 종류 (quick, breakdown, complete, workbook, document)
    #[arg(long, value_delimiter = ',')]
    pub export: Option<Vec<ExportKind>>,
    /// 출력 디렉터리
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// 결과를 JSON으로 출력한다
    #[arg(long)]
    pub json: bool,
}
