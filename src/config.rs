use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_URGENCY_COST_MULTIPLIER;
use crate::pricing::inputs::DEFAULT_PROJECT_NAME;
use crate::report::export::ExportKind;
use crate::report::DEFAULT_GENERATED_BY;

pub const DEFAULT_CONFIG_FILE: &str = "estimator.toml";

/// 프로젝트 기본 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub name: String,
    pub client: Option<String>,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            client: None,
        }
    }
}

/// 보정값 기본 설정. CLI 인자가 있으면 그쪽이 우선한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationDefaults {
    pub bus_per_mw: f64,
    pub urgency_cost_multiplier: f64,
}

impl Default for CalibrationDefaults {
    fn default() -> Self {
        Self {
            bus_per_mw: 1.0,
            urgency_cost_multiplier: DEFAULT_URGENCY_COST_MULTIPLIER,
        }
    }
}

/// 파일 출력 기본 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    pub output_dir: PathBuf,
    /// `--export`를 주지 않았을 때 만들 출력 종류
    pub formats: Vec<ExportKind>,
    /// 문서 뷰 한 페이지 줄 수 (A4 기준)
    pub lines_per_page: usize,
    pub generated_by: String,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            formats: Vec::new(),
            lines_per_page: 60,
            generated_by: DEFAULT_GENERATED_BY.to_string(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub project: ProjectDefaults,
    pub calibration: CalibrationDefaults,
    pub export: ExportDefaults,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정으로 새로 만든다.
pub fn load_or_default(path: &Path) -> Result<EstimatorConfig, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: EstimatorConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = EstimatorConfig::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl EstimatorConfig {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
