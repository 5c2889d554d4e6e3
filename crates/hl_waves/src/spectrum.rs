// crates/hl_waves/src/spectrum.rs

//! 波浪能谱
//!
//! 由风速参数化的 Pierson-Moskowitz 型谱密度，定义在 ζ = log2(波长)
//! 空间上，支撑区间 [log2(0.03), log2(10)]。
//!
//! # 并发约定
//!
//! 谱是无状态纯函数：[`Spectrum::evaluate`] 无副作用，相同输入在任意
//! 并发上下文中返回相同结果。群速度与波形缓冲的积分循环依赖这一点。

/// Pierson-Moskowitz 型谱
#[derive(Debug, Clone, Copy)]
pub struct Spectrum {
    wind_speed: f64,
}

impl Spectrum {
    /// 按风速 [m/s] 创建谱
    pub fn new(wind_speed: f64) -> Self {
        Self { wind_speed }
    }

    /// 风速 [m/s]
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// 支撑区间下界（ζ 空间）
    pub fn min_zeta(&self) -> f64 {
        0.03_f64.log2()
    }

    /// 支撑区间上界（ζ 空间）
    pub fn max_zeta(&self) -> f64 {
        10.0_f64.log2()
    }

    /// ζ 处的谱密度
    pub fn evaluate(&self, zeta: f64) -> f64 {
        let a = 1.1_f64.powf(1.5 * zeta);
        let b = (-1.8038897788076411 * 4.0_f64.powf(zeta) / self.wind_speed.powi(4)).exp();
        0.139098 * (a * b).sqrt()
    }
}
