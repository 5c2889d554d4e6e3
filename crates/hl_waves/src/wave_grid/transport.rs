// crates/hl_waves/src/wave_grid/transport.rs

//! 输运：半拉格朗日平流、角向扩散与边界反射
//!
//! 两类扫描都遵循同一纪律：读当前缓冲、写影子缓冲、全扫描结束后
//! 一次交换。任何读取都不会观察到同一扫描的写入。每个 (x, y) 节点
//! 的工作与其他节点无关，按 x 行（影子缓冲的连续切片）rayon 并行。

use glam::{DVec2, DVec4};
use hl_foundation::{interpolate4_masked, pos_modulo, AxisScheme, Grid};
use rayon::prelude::*;

use super::axes::Axes;
use super::{WaveGrid, CALIBRATION_INFLOW_AMPLITUDE, X, ZETA};
use crate::environment::Environment;

/// 离散网格的逻辑无限扩展
///
/// θ 索引按 n_theta 周期环绕；ζ 越界返回 0（模拟带之外无能量）；
/// x/y 越界返回固定默认值：除单一校准方向桶（索引 5·n_theta/16，
/// 返回小常数入流）外均为 0。
pub(super) struct ExtendedView<'a> {
    grid: &'a Grid,
}

impl<'a> ExtendedView<'a> {
    pub(super) fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// 任意整数索引处的幅度
    pub(super) fn value(&self, ix: i64, iy: i64, itheta: i64, izeta: i64) -> f64 {
        let [n_x, n_y, n_theta, n_zeta] = self.grid.dimensions();

        let itheta = pos_modulo(itheta, n_theta as i64);

        if izeta < 0 || izeta >= n_zeta as i64 {
            return 0.0;
        }
        if ix < 0 || ix >= n_x as i64 || iy < 0 || iy >= n_y as i64 {
            return default_amplitude(itheta, n_theta);
        }

        self.grid
            .at(ix as usize, iy as usize, itheta as usize, izeta as usize)
    }
}

/// 模拟框外的默认幅度
#[inline]
pub(super) fn default_amplitude(itheta: i64, n_theta: usize) -> f64 {
    if itheta == (5 * n_theta / 16) as i64 {
        CALIBRATION_INFLOW_AMPLITUDE
    } else {
        0.0
    }
}

/// 插值幅度场
///
/// 在扩展网格上组合 x, y, θ 的线性插值与 ζ 的最近邻插值
/// （n_zeta = 1 时按设计退化），再按环境的域谓词做掩码：
/// 域外节点不污染插值结果，全域外时定义为 0。
pub(super) struct AmplitudeField<'a, E: Environment> {
    pub(super) view: ExtendedView<'a>,
    pub(super) axes: Axes,
    pub(super) environment: &'a E,
}

impl<E: Environment> AmplitudeField<'_, E> {
    /// 物理坐标处的插值幅度
    pub(super) fn sample(&self, pos4: DVec4) -> f64 {
        let g = self.axes.pos_to_grid(pos4);
        interpolate4_masked(
            [
                AxisScheme::Linear,
                AxisScheme::Linear,
                AxisScheme::Linear,
                AxisScheme::Nearest,
            ],
            [g.x, g.y, g.z, g.w],
            |i0, i1, i2, i3| self.view.value(i0, i1, i2, i3),
            |i0, i1, _, _| self.environment.in_domain(self.axes.node_position(i0, i1)),
        )
    }
}

/// 把出界点反射回域内
///
/// 水平集非负时点在域内，原样返回；否则把位置与波方向按边界法线
/// （水平集梯度）镜像，θ 由反射后的方向经 atan2 重算。
///
/// 假定一次反射即可回到域内（凹边界下可能不成立，按已知假设保留，
/// 不做二次校验）。
pub(super) fn reflect<E: Environment>(environment: &E, pos4: DVec4) -> DVec4 {
    let pos = DVec2::new(pos4.x, pos4.y);
    let ls = environment.levelset(pos);
    if ls >= 0.0 {
        return pos4;
    }

    let n = environment.levelset_grad(pos);

    let theta = pos4.z;
    let kdir = DVec2::new(theta.cos(), theta.sin());

    // 依赖水平集等于到边界的有符号距离
    let pos = pos - 2.0 * ls * n;
    let kdir = kdir - 2.0 * kdir.dot(n) * n;

    let reflected_theta = kdir.y.atan2(kdir.x);

    DVec4::new(pos.x, pos.y, reflected_theta, pos4.w)
}

impl<E: Environment> WaveGrid<E> {
    /// 边界反射（见 [`reflect`]）
    pub fn boundary_reflection(&self, pos4: DVec4) -> DVec4 {
        reflect(&self.environment, pos4)
    }

    /// 半拉格朗日平流扫描
    ///
    /// 对每个域内 (x, y) 节点、每个 (θ, ζ) 带：沿群速度把出发点
    /// 回溯 dt，对出发点施加边界反射，在步前缓冲上采样插值幅度，
    /// 写入影子缓冲的原节点。域外节点保留步前值：域掩码只约束
    /// 写入，不约束读取。全扫描后交换缓冲。
    pub fn advection_step(&mut self, dt: f64) {
        let axes = self.axes;
        let [_, n_y, n_theta, n_zeta] = axes.dims;
        let row_len = n_y * n_theta * n_zeta;

        let current = &self.amplitude;
        let environment = &self.environment;
        let group_speeds = self.group_speeds.as_slice();
        let field = AmplitudeField {
            view: ExtendedView::new(current),
            axes,
            environment,
        };

        let group_velocity = |pos4: DVec4| -> DVec2 {
            let izeta = axes
                .pos_to_idx_axis(pos4.w, ZETA)
                .clamp(0, n_zeta as i64 - 1) as usize;
            group_speeds[izeta] * DVec2::new(pos4.z.cos(), pos4.z.sin())
        };

        self.scratch
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(ix, row)| {
                for iy in 0..n_y {
                    let pos = axes.node_position(ix as i64, iy as i64);
                    let base = iy * n_theta * n_zeta;

                    if environment.in_domain(pos) {
                        for itheta in 0..n_theta {
                            for izeta in 0..n_zeta {
                                let pos4 = axes.idx_to_pos([
                                    ix as i64,
                                    iy as i64,
                                    itheta as i64,
                                    izeta as i64,
                                ]);
                                let vel = group_velocity(pos4);

                                // 半拉格朗日回溯
                                let mut departure = pos4;
                                departure.x -= dt * vel.x;
                                departure.y -= dt * vel.y;

                                let departure = reflect(environment, departure);

                                row[base + itheta * n_zeta + izeta] = field.sample(departure);
                            }
                        }
                    } else {
                        for itheta in 0..n_theta {
                            for izeta in 0..n_zeta {
                                row[base + itheta * n_zeta + izeta] =
                                    current.at(ix, iy, itheta, izeta);
                            }
                        }
                    }
                }
            });

        std::mem::swap(&mut self.amplitude, &mut self.scratch);
    }

    /// 显式角向扩散扫描
    ///
    /// 每带的扩散率 γ = 2·0.025·cg(ζ)·dt/dx。更新
    /// `(1−γ)·旧值 + γ·0.5·(θ+1 邻 + θ−1 邻)`，θ 经扩展网格周期环绕。
    /// 只在水平集距边界至少 4·dx 的节点施加，近边界节点原样保留，
    /// 避免把反射数据混入扩散。全扫描后交换缓冲。
    pub fn diffusion_step(&mut self, dt: f64) {
        let axes = self.axes;
        let [_, n_y, n_theta, n_zeta] = axes.dims;
        let row_len = n_y * n_theta * n_zeta;

        let environment = &self.environment;
        let group_speeds = self.group_speeds.as_slice();
        let view = ExtendedView::new(&self.amplitude);

        let boundary_distance = 4.0 * axes.dx[X];

        self.scratch
            .as_mut_slice()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(ix, row)| {
                for iy in 0..n_y {
                    let ls = environment.levelset(axes.node_position(ix as i64, iy as i64));
                    let base = iy * n_theta * n_zeta;

                    for itheta in 0..n_theta {
                        for izeta in 0..n_zeta {
                            let old = view.value(ix as i64, iy as i64, itheta as i64, izeta as i64);

                            row[base + itheta * n_zeta + izeta] = if ls >= boundary_distance {
                                let gamma = 2.0
                                    * super::ANGULAR_DIFFUSION_COEFF
                                    * group_speeds[izeta]
                                    * dt
                                    * axes.inv_dx[X];
                                let neighbors = view.value(
                                    ix as i64,
                                    iy as i64,
                                    itheta as i64 + 1,
                                    izeta as i64,
                                ) + view.value(
                                    ix as i64,
                                    iy as i64,
                                    itheta as i64 - 1,
                                    izeta as i64,
                                );
                                (1.0 - gamma) * old + gamma * 0.5 * neighbors
                            } else {
                                old
                            };
                        }
                    }
                }
            });

        std::mem::swap(&mut self.amplitude, &mut self.scratch);
    }
}
