// crates/hl_waves/src/config.rs

//! 求解器配置
//!
//! 纯数据的设置值，serde 可序列化，带默认值。退化配置在
//! [`WaveGridConfig::validate`] 中拒绝，不进入模拟。
//!
//! ζ 轴的范围不在配置中：它由谱的支撑区间决定。

use hl_foundation::{HlError, HlResult};
use serde::{Deserialize, Serialize};

/// WaveGrid 配置
///
/// 物理域为 `[-size, size] × [-size, size] × [0, 2π) × [ζ_min, ζ_max]`，
/// 网格分辨率为 `n_x × n_x × n_theta × n_zeta`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveGridConfig {
    /// 空间域半宽 [m]：域为 [-size, size]²
    #[serde(default = "default_size")]
    pub size: f64,

    /// 谱的风速参数 [m/s]
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,

    /// 每个空间维度的节点数
    #[serde(default = "default_n_x")]
    pub n_x: usize,

    /// 离散波方向数
    #[serde(default = "default_n_theta")]
    pub n_theta: usize,

    /// ζ 带数（波长分辨率）
    #[serde(default = "default_n_zeta")]
    pub n_zeta: usize,

    /// 初始时间 [s]
    ///
    /// 默认 100：t = 0 时各波列完全同相，会出现奇异的相干图样
    #[serde(default = "default_initial_time")]
    pub initial_time: f64,

    /// 波形缓冲的采样分辨率
    #[serde(default = "default_profile_resolution")]
    pub profile_resolution: usize,

    /// 波形缓冲周期因子：周期 = periodicity · 2^ζ_max
    #[serde(default = "default_profile_periodicity")]
    pub profile_periodicity: f64,

    /// 每次谱积分的节点数
    #[serde(default = "default_integration_nodes")]
    pub integration_nodes: usize,

    /// 水面重建的幅度放大系数（无量纲，仅作用于显示查询）
    #[serde(default = "default_amplification")]
    pub spectrum_amplification: f64,
}

fn default_size() -> f64 {
    50.0
}
fn default_wind_speed() -> f64 {
    10.0
}
fn default_n_x() -> usize {
    100
}
fn default_n_theta() -> usize {
    16
}
fn default_n_zeta() -> usize {
    1
}
fn default_initial_time() -> f64 {
    100.0
}
fn default_profile_resolution() -> usize {
    4096
}
fn default_profile_periodicity() -> f64 {
    2.0
}
fn default_integration_nodes() -> usize {
    100
}
fn default_amplification() -> f64 {
    1.0
}

impl Default for WaveGridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            wind_speed: default_wind_speed(),
            n_x: default_n_x(),
            n_theta: default_n_theta(),
            n_zeta: default_n_zeta(),
            initial_time: default_initial_time(),
            profile_resolution: default_profile_resolution(),
            profile_periodicity: default_profile_periodicity(),
            integration_nodes: default_integration_nodes(),
            spectrum_amplification: default_amplification(),
        }
    }
}

impl WaveGridConfig {
    /// 校验配置
    pub fn validate(&self) -> HlResult<()> {
        if !(self.size > 0.0 && self.size.is_finite()) {
            return Err(HlError::invalid_parameter("size", self.size, "必须为正的有限值"));
        }
        if !(self.wind_speed > 0.0 && self.wind_speed.is_finite()) {
            return Err(HlError::invalid_parameter(
                "wind_speed",
                self.wind_speed,
                "必须为正的有限值",
            ));
        }
        if self.n_x == 0 {
            return Err(HlError::invalid_parameter("n_x", self.n_x, "必须为正"));
        }
        if self.n_theta == 0 {
            return Err(HlError::invalid_parameter("n_theta", self.n_theta, "必须为正"));
        }
        if self.n_zeta == 0 {
            return Err(HlError::invalid_parameter("n_zeta", self.n_zeta, "必须为正"));
        }
        if self.profile_resolution == 0 {
            return Err(HlError::invalid_parameter(
                "profile_resolution",
                self.profile_resolution,
                "必须为正",
            ));
        }
        if !(self.profile_periodicity > 0.0) {
            return Err(HlError::invalid_parameter(
                "profile_periodicity",
                self.profile_periodicity,
                "必须为正",
            ));
        }
        if self.integration_nodes == 0 {
            return Err(HlError::invalid_parameter(
                "integration_nodes",
                self.integration_nodes,
                "必须为正",
            ));
        }
        if !(self.spectrum_amplification > 0.0 && self.spectrum_amplification.is_finite()) {
            return Err(HlError::invalid_parameter(
                "spectrum_amplification",
                self.spectrum_amplification,
                "必须为正的有限值",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WaveGridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let config = WaveGridConfig {
            n_x: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_size_rejected() {
        let config = WaveGridConfig {
            size: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: WaveGridConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.n_x, 100);
        assert_eq!(config.n_theta, 16);
        assert_eq!(config.profile_resolution, 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = WaveGridConfig {
            size: 25.0,
            n_theta: 32,
            ..Default::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: WaveGridConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.size, 25.0);
        assert_eq!(back.n_theta, 32);
    }
}
