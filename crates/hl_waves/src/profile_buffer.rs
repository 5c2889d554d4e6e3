// crates/hl_waves/src/profile_buffer.rs

//! 波形查找缓冲
//!
//! 一条 ζ 带的周期性波形查找表：对谱在带区间上积分两列反相的
//! Gerstner 波列的叠加，得到每个采样位置的 4 分量向量
//! （水平位移、垂直位移、水平位移导数、垂直位移导数）。
//!
//! 两列波列分别锚定在 p 与 p − period，各乘以归一化位置的三次
//! "鼓包"窗 `x²(2|x|−3)+1`（|x|<1，否则 0），使波能在窗边界处平滑
//! 衰减到零，避免周期缓冲环绕处出现不连续。
//!
//! 预计算按采样位置数据并行（rayon）；缓冲本身只读，可在并行
//! 扫描内安全求值。

use glam::DVec4;
use hl_foundation::{integrate, pos_modulo, AxisScheme};
use rayon::prelude::*;

use crate::dispersion::{dispersion_relation, wave_length, wave_number};
use crate::spectrum::Spectrum;

/// 一条 ζ 带的预计算波形缓冲
#[derive(Debug, Clone, Default)]
pub struct ProfileBuffer {
    period: f64,
    data: Vec<DVec4>,
}

impl ProfileBuffer {
    /// 创建空缓冲，需先 [`ProfileBuffer::precompute`] 方可求值
    pub fn new() -> Self {
        Self::default()
    }

    /// 缓冲周期 [m]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// 采样数
    pub fn resolution(&self) -> usize {
        self.data.len()
    }

    /// 在给定时间预计算缓冲
    ///
    /// - `spectrum`: ζ 空间的谱密度
    /// - `time`: 预计算时刻 [s]
    /// - `zeta_min`/`zeta_max`: 带的积分区间
    /// - `resolution`: 采样数
    /// - `periodicity`: 周期 = periodicity · 2^ζ_max
    /// - `integration_nodes`: 谱积分节点数
    #[allow(clippy::too_many_arguments)]
    pub fn precompute(
        &mut self,
        spectrum: &Spectrum,
        time: f64,
        zeta_min: f64,
        zeta_max: f64,
        resolution: usize,
        periodicity: f64,
        integration_nodes: usize,
    ) {
        let period = periodicity * 2.0_f64.powf(zeta_max);
        self.period = period;
        self.data = (0..resolution)
            .into_par_iter()
            .map(|i| {
                let p = i as f64 * period / resolution as f64;
                integrate(integration_nodes, zeta_min, zeta_max, |zeta| {
                    let knum = wave_number(zeta);
                    let phase1 = knum * p - dispersion_relation(knum) * time;
                    let phase2 = knum * (p - period) - dispersion_relation(knum) * time;
                    let weight1 = p / period;
                    let weight2 = 1.0 - weight1;
                    (gerstner_wave(phase1, knum) * cubic_bump(weight1)
                        + gerstner_wave(phase2, knum) * cubic_bump(weight2))
                        * (wave_length(zeta) * spectrum.evaluate(zeta))
                })
            })
            .collect();
    }

    /// 在位置 `p` 求值波形（线性插值，周期环绕）
    ///
    /// 通常 `p = dot(position, wave_direction)`。
    pub fn evaluate(&self, p: f64) -> DVec4 {
        let n = self.data.len() as i64;
        debug_assert!(n > 0, "缓冲未预计算");

        AxisScheme::Linear.eval(
            |i| self.data[pos_modulo(i, n) as usize],
            n as f64 * p / self.period,
        )
    }
}

/// Gerstner 波的 4 分量贡献
///
/// 依次为：水平位置偏移、垂直位置偏移、水平偏移的位置导数、
/// 垂直偏移的位置导数。
#[inline]
fn gerstner_wave(phase: f64, knum: f64) -> DVec4 {
    let s = phase.sin();
    let c = phase.cos();
    DVec4::new(-s, c, -knum * c, -knum * s)
}

/// 三次"鼓包"窗：|x| < 1 时为 `x²(2|x|−3)+1`，否则 0
#[inline]
fn cubic_bump(x: f64) -> f64 {
    if x.abs() >= 1.0 {
        0.0
    } else {
        x * x * (2.0 * x.abs() - 3.0) + 1.0
    }
}
