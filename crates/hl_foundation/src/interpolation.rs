// crates/hl_foundation/src/interpolation.rs

//! 插值组合子
//!
//! 每个一维策略把"整数坐标上的函数"变换为"连续坐标上的函数"。
//! 多轴组合从左到右逐轴固定坐标，把 N 元离散函数提升为 N 元连续函数；
//! 域掩码组合在其上叠加 (值, 权重) 对，使定义域之外的节点不污染结果。
//!
//! # 插值策略
//!
//! - [`AxisScheme::Nearest`]: 取 `f(round(x))`
//! - [`AxisScheme::Linear`]: `floor(x)` 与 `floor(x)+1` 按小数权重混合。
//!   在整数节点处只采样对应节点，权重为 0 的邻点从不被访问，
//!   扩展网格之外的读取由此避免
//! - [`AxisScheme::Cubic`]: 4 点 Catmull-Rom 型 Hermite，切线取相邻
//!   两区间的中心差分；整数节点处直接返回节点值
//!
//! # 并发约定
//!
//! 组合子只通过 `FnMut` 调用离散函数，不持有任何可变状态；
//! 被捕获的网格/频谱访问器必须是无状态的，同一扫描可并发重复调用。

use glam::{DVec2, DVec4};
use std::ops::{Add, Mul};

/// 插值可作用的值类型
///
/// 封闭于加法与 f64 缩放，带零元。标量幅度用 `f64`，
/// (值, 权重) 对用 [`DVec2`]，波形向量用 [`DVec4`]。
pub trait InterpValue: Copy + Add<Output = Self> + Mul<f64, Output = Self> {
    /// 零元
    const ZERO: Self;
}

impl InterpValue for f64 {
    const ZERO: Self = 0.0;
}

impl InterpValue for DVec2 {
    const ZERO: Self = DVec2::ZERO;
}

impl InterpValue for DVec4 {
    const ZERO: Self = DVec4::ZERO;
}

/// 一维插值策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScheme {
    /// 最近邻
    Nearest,
    /// 线性
    Linear,
    /// 三次 Hermite（Catmull-Rom 切线）
    Cubic,
}

impl AxisScheme {
    /// 在连续坐标 `x` 处求值离散函数 `f` 的插值
    pub fn eval<V, F>(self, mut f: F, x: f64) -> V
    where
        V: InterpValue,
        F: FnMut(i64) -> V,
    {
        match self {
            AxisScheme::Nearest => f(x.round() as i64),
            AxisScheme::Linear => {
                let ix = x.floor() as i64;
                let wx = x - ix as f64;

                // 权重为 0 的节点不采样，整数坐标处不会探测相邻越界节点
                let hi = if wx != 0.0 { f(ix + 1) * wx } else { V::ZERO };
                let lo = if wx != 1.0 { f(ix) * (1.0 - wx) } else { V::ZERO };
                hi + lo
            }
            AxisScheme::Cubic => {
                let ix = x.floor() as i64;
                let wx = x - ix as f64;

                if wx == 0.0 {
                    return f(ix);
                }

                let pm1 = f(ix - 1);
                let p0 = f(ix);
                let p1 = f(ix + 1);
                let p2 = f(ix + 2);

                // 中心差分切线
                let m0 = (p1 + pm1 * -1.0) * 0.5;
                let m1 = (p2 + p0 * -1.0) * 0.5;

                let t1 = wx;
                let t2 = t1 * wx;
                let t3 = t2 * wx;

                p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
                    + m0 * (t3 - 2.0 * t2 + t1)
                    + p1 * (-2.0 * t3 + 3.0 * t2)
                    + m1 * (t3 - t2)
            }
        }
    }
}

/// 四轴逐维插值
///
/// 给定四个一维策略，从左到右逐轴固定坐标，把四元离散函数
/// `f(i0, i1, i2, i3)` 提升为连续坐标 `pos` 上的函数并求值。
pub fn interpolate4<V, F>(schemes: [AxisScheme; 4], pos: [f64; 4], mut f: F) -> V
where
    V: InterpValue,
    F: FnMut(i64, i64, i64, i64) -> V,
{
    let f = &mut f;
    schemes[0].eval(
        |i0| {
            schemes[1].eval(
                |i1| {
                    schemes[2].eval(
                        |i2| schemes[3].eval(|i3| f(i0, i1, i2, i3), pos[3]),
                        pos[2],
                    )
                },
                pos[1],
            )
        },
        pos[0],
    )
}

/// 域掩码四轴插值
///
/// 把离散函数替换为 (权重·值, 权重) 对：定义域内权重 1，域外权重 0。
/// 对该对插值后，权重非零时返回 值/权重，否则定义为 0（从不产生 NaN）。
pub fn interpolate4_masked<F, D>(
    schemes: [AxisScheme; 4],
    pos: [f64; 4],
    mut f: F,
    mut domain: D,
) -> f64
where
    F: FnMut(i64, i64, i64, i64) -> f64,
    D: FnMut(i64, i64, i64, i64) -> bool,
{
    let pair: DVec2 = interpolate4(schemes, pos, |i0, i1, i2, i3| {
        if domain(i0, i1, i2, i3) {
            DVec2::new(f(i0, i1, i2, i3), 1.0)
        } else {
            DVec2::ZERO
        }
    });

    if pair.y != 0.0 {
        pair.x / pair.y
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nearest_rounds() {
        let f = |i: i64| i as f64 * 10.0;
        let v: f64 = AxisScheme::Nearest.eval(f, 1.4);
        assert_eq!(v, 10.0);
        let v: f64 = AxisScheme::Nearest.eval(f, 1.6);
        assert_eq!(v, 20.0);
    }

    #[test]
    fn test_linear_exact_at_nodes_without_probing() {
        // 整数坐标处权重为 0 的邻点从不被访问
        let f = |i: i64| {
            assert_eq!(i, 3, "权重为 0 的节点被采样了");
            42.0
        };
        let v: f64 = AxisScheme::Linear.eval(f, 3.0);
        assert_eq!(v, 42.0);
    }

    #[test]
    fn test_linear_midpoint() {
        let f = |i: i64| i as f64;
        let v: f64 = AxisScheme::Linear.eval(f, 2.5);
        assert_relative_eq!(v, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_exact_at_nodes() {
        let mut calls = 0;
        let v: f64 = AxisScheme::Cubic.eval(
            |i| {
                calls += 1;
                (i * i) as f64
            },
            2.0,
        );
        assert_eq!(v, 4.0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cubic_reproduces_linear_ramp() {
        // Catmull-Rom 对线性函数精确
        let f = |i: i64| 3.0 * i as f64 + 1.0;
        for &x in &[0.25, 0.5, 1.75, 2.9] {
            let v: f64 = AxisScheme::Cubic.eval(f, x);
            assert_relative_eq!(v, 3.0 * x + 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interpolate4_bilinear_plane() {
        // f = i0 + 2·i1 是线性的，四轴线性插值应精确重现
        let schemes = [AxisScheme::Linear; 4];
        let v: f64 = interpolate4(schemes, [0.5, 1.25, 0.0, 0.0], |i0, i1, _, _| {
            i0 as f64 + 2.0 * i1 as f64
        });
        assert_relative_eq!(v, 0.5 + 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_masked_zero_weight_is_zero() {
        let schemes = [AxisScheme::Linear; 4];
        let v = interpolate4_masked(
            schemes,
            [0.5, 0.5, 0.0, 0.0],
            |_, _, _, _| 123.0,
            |_, _, _, _| false,
        );
        assert_eq!(v, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_masked_partial_domain_renormalizes() {
        // 半边在域内：结果为域内值本身，不被域外 0 稀释
        let schemes = [AxisScheme::Linear, AxisScheme::Nearest, AxisScheme::Nearest, AxisScheme::Nearest];
        let v = interpolate4_masked(
            schemes,
            [0.5, 0.0, 0.0, 0.0],
            |i0, _, _, _| if i0 == 0 { 8.0 } else { 100.0 },
            |i0, _, _, _| i0 == 0,
        );
        assert_relative_eq!(v, 8.0, epsilon = 1e-12);
    }
}
