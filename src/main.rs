use clap::Parser;
use dc_power_study_estimator::{app, cli::Cli};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 로그를 초기화한 뒤 CLI 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = app::run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// `RUST_LOG`가 있으면 그 값을, 없으면 -v 횟수에 따른 레벨을 쓴다.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
