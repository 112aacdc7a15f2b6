//! 모선(bus) 수 추정.
//!
//! 현재 공식은 Tier별 밀도 기반 근사치이며, 별도의 모선 산정 도구로 교체할 수 있도록
//! `BusEstimator` 하나만 주입 지점으로 둔다.

use crate::pricing::inputs::{InputError, ProjectInputs};

/// 입력값으로부터 모선 수를 추정한다.
pub trait BusEstimator {
    fn estimate_buses(&self, inputs: &ProjectInputs) -> Result<u32, InputError>;
}

/// `ceil(총부하 × Tier 밀도 × 보정배수)`. 일부 모선도 온전한 작업량이 필요하므로 항상 올림한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityBusEstimator;

impl BusEstimator for DensityBusEstimator {
    fn estimate_buses(&self, inputs: &ProjectInputs) -> Result<u32, InputError> {
        let raw = inputs.total_load_mw()
            * inputs.tier.bus_density_per_mw()
            * inputs.bus_per_mw_calibration;
        if !raw.is_finite() {
            return Err(InputError::BusCountOutOfRange { value: raw });
        }
        if raw <= 0.0 {
            return Ok(0);
        }
        let buses = raw.ceil();
        if buses > f64::from(u32::MAX) {
            return Err(InputError::BusCountOutOfRange { value: buses });
        }
        Ok(buses as u32)
    }
}
