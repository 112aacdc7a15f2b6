//! 데이터센터 전력계통 스터디(조류, 단락, 보호협조, 아크플래시) 견적 계산 라이브러리.
//! 계산 엔진과 출력 변환을 라이브러리로 두어 CLI 외의 화면에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod pricing;
pub mod report;
pub mod ui_cli;
