//! 입력값 → 비용/일정 결과로 가는 순수 계산 엔진.

pub mod bus_estimate;
pub mod engine;
pub mod inputs;
pub mod timeline;

pub use bus_estimate::{BusEstimator, DensityBusEstimator};
pub use engine::*;
pub use inputs::{InputError, ProjectInputs};
pub use timeline::{Phase, Timeline};
