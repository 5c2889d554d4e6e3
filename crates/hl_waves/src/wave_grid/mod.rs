// crates/hl_waves/src/wave_grid/mod.rs

//! 波能网格求解器
//!
//! 在 `[-size,size]² × [0,2π) × [ζ_min,ζ_max]` 相空间上持有双缓冲的
//! 波能幅度网格、各 ζ 带的群速度与波形缓冲，编排时间步进与水面重建。
//!
//! # 离散化
//!
//! 节点在单元中心，θ₀ = 0.5·dθ。位置由 (x, y, θ, ζ) 确定：
//! θ = 0 对应 +x 方向的波矢，ζ = log2(波长)。
//!
//! # 生命周期
//!
//! *constructed*（网格已分配、群速度与初始波形缓冲已算）→
//! *stepping*（反复调用 [`WaveGrid::time_step`]），无终止态。
//! 群速度只在构造时计算一次（谱视为时不变）；波形缓冲每步重算。
//! 所有网格内容的变更都经由本类型，外部不直接改写。
//!
//! # 并发
//!
//! 一次 `time_step` 不可与另一次重叠；平流与扩散扫描内部按 (x, y)
//! 数据并行，双缓冲交换是唯一的并发控制手段。

mod axes;
mod transport;

pub use axes::Axes;

use glam::{DVec2, DVec3, DVec4};
use hl_foundation::{integrate, Grid, HlError, HlResult};
use std::f64::consts::TAU;

use crate::config::WaveGridConfig;
use crate::dispersion::{deep_water_group_speed, wave_length, wave_number};
use crate::environment::Environment;
use crate::profile_buffer::ProfileBuffer;
use crate::spectrum::Spectrum;

use transport::{AmplitudeField, ExtendedView};

/// x 轴索引
pub const X: usize = 0;
/// y 轴索引
pub const Y: usize = 1;
/// θ（波方向）轴索引
pub const THETA: usize = 2;
/// ζ（log2 波长）轴索引
pub const ZETA: usize = 3;

/// 模拟框外的定向校准入流幅度
///
/// 扩展网格在 x/y 越界处除单一校准方向桶外返回 0，
/// 该桶返回此小常数，是除显式扰动外唯一的开边界源项。
pub(crate) const CALIBRATION_INFLOW_AMPLITUDE: f64 = 0.1;

/// 角向扩散系数（扩散率 γ = 2·系数·cg·dt/dx）
const ANGULAR_DIFFUSION_COEFF: f64 = 0.025;

/// 波能网格
///
/// 构造见 [`WaveGrid::new`]，步进见 [`WaveGrid::time_step`]，
/// 渲染端查询见 [`WaveGrid::amplitude`] 与 [`WaveGrid::water_surface`]。
pub struct WaveGrid<E: Environment> {
    config: WaveGridConfig,
    spectrum: Spectrum,
    environment: E,

    /// 当前幅度缓冲
    amplitude: Grid,
    /// 影子缓冲：扫描写入处，扫描结束后与当前缓冲交换
    scratch: Grid,

    /// 每个 ζ 带一条波形缓冲
    profile_buffers: Vec<ProfileBuffer>,
    /// 每个 ζ 带一个谱密度加权平均群速度
    group_speeds: Vec<f64>,

    axes: Axes,
    time: f64,
}

impl<E: Environment> WaveGrid<E> {
    /// 构造求解器
    ///
    /// 分配两个同形幅度网格，由域尺寸与谱的 ζ 支撑派生轴边界，
    /// 计算各带群速度与初始波形缓冲。
    ///
    /// # Errors
    ///
    /// 退化配置（零分辨率、非正尺寸、倒置的 ζ 区间）返回错误。
    pub fn new(config: WaveGridConfig, environment: E) -> HlResult<Self> {
        config.validate()?;

        let spectrum = Spectrum::new(config.wind_speed);
        let zeta_min = spectrum.min_zeta();
        let zeta_max = spectrum.max_zeta();
        if zeta_min >= zeta_max {
            return Err(HlError::config("谱的 ζ 支撑区间退化"));
        }

        let dims = [config.n_x, config.n_x, config.n_theta, config.n_zeta];
        let axes = Axes::new(
            [-config.size, -config.size, 0.0, zeta_min],
            [config.size, config.size, TAU, zeta_max],
            dims,
        );

        let mut amplitude = Grid::new();
        amplitude.resize(dims[X], dims[Y], dims[THETA], dims[ZETA]);
        let scratch = amplitude.clone();

        let mut wave_grid = Self {
            time: config.initial_time,
            profile_buffers: vec![ProfileBuffer::new(); config.n_zeta],
            group_speeds: Vec::new(),
            config,
            spectrum,
            environment,
            amplitude,
            scratch,
            axes,
        };
        wave_grid.precompute_group_speeds();
        wave_grid.precompute_profile_buffers();

        log::info!(
            "WaveGrid 构造完成: {}×{}×{}×{} 节点, ζ ∈ [{:.3}, {:.3}], t₀ = {}",
            dims[X],
            dims[Y],
            dims[THETA],
            dims[ZETA],
            zeta_min,
            zeta_max,
            wave_grid.time,
        );

        Ok(wave_grid)
    }

    /// 执行一次时间步
    ///
    /// `full_update` 为真时先平流、后扩散（各自在全扫描后交换缓冲）；
    /// 无论如何都在新时刻重算全部波形缓冲，并把内部时间推进 `dt`。
    /// 合理的 `dt` 由 [`WaveGrid::cfl_time_step`] 给出。
    pub fn time_step(&mut self, dt: f64, full_update: bool) {
        if full_update {
            self.advection_step(dt);
            self.diffusion_step(dt);
        }
        self.precompute_profile_buffers();
        self.time += dt;

        log::debug!("时间步完成: dt = {:.4}, t = {:.2}", dt, self.time);
    }

    /// CFL 稳定性时间步上界
    ///
    /// 最快的带（最长波长，即最后一个 ζ 带）穿过一个空间单元的时间。
    pub fn cfl_time_step(&self) -> f64 {
        let last = self.axes.dim(ZETA) - 1;
        self.axes.dx[X].min(self.axes.dx[Y]) / self.group_speed(last)
    }

    /// 给定点的插值幅度
    ///
    /// `pos4` 为物理坐标。模拟框之外的查询平滑退化为既定默认值
    /// （ζ 越界为 0，x/y 越界为校准入流），从不失败。
    pub fn amplitude(&self, pos4: DVec4) -> f64 {
        self.amplitude_field().sample(pos4)
    }

    /// 节点索引处的幅度（经扩展网格，任何索引都有效）
    pub fn grid_value(&self, idx4: [i64; 4]) -> f64 {
        ExtendedView::new(&self.amplitude).value(idx4[X], idx4[Y], idx4[THETA], idx4[ZETA])
    }

    /// 水面位移与法线
    ///
    /// 对每个 ζ 带按 4 倍于离散方向数的精细角向采样（抑制重建混叠），
    /// 以幅度乘波形缓冲累加水平/垂直位移与两条切向量，
    /// 返回位移后的位置与切向量叉积的归一化法线。
    pub fn water_surface(&self, pos: DVec2) -> (DVec3, DVec3) {
        let mut displacement = DVec3::ZERO;
        let mut tx = DVec3::ZERO;
        let mut ty = DVec3::ZERO;

        let n_theta = self.axes.dim(THETA);
        for izeta in 0..self.axes.dim(ZETA) {
            let zeta = self.axes.idx_to_pos_axis(izeta as i64, ZETA);
            let profile = &self.profile_buffers[izeta];

            let n = 4 * n_theta;
            let d_weight = n_theta as f64 * TAU / n as f64;
            for ia in 0..n {
                let angle = ia as f64 / n as f64 * TAU;
                let kdir = DVec2::new(angle.cos(), angle.sin());
                let kdir_x = kdir.dot(pos);

                let wave_data = profile.evaluate(kdir_x)
                    * (d_weight
                        * self.config.spectrum_amplification
                        * self.amplitude(DVec4::new(pos.x, pos.y, angle, zeta)));

                displacement +=
                    DVec3::new(kdir.x * wave_data.x, kdir.y * wave_data.x, wave_data.y);
                tx += kdir.x * DVec3::new(wave_data.z, 0.0, wave_data.w);
                ty += kdir.y * DVec3::new(0.0, wave_data.z, wave_data.w);
            }
        }

        let normal = tx.cross(ty).normalize_or_zero();
        (DVec3::new(pos.x, pos.y, 0.0) + displacement, normal)
    }

    /// 增加点扰动
    ///
    /// 把 `pos` 取整到最近的空间节点，向该点 ζ 带 0 的所有方向加上
    /// `val`；节点在网格范围外时为空操作。
    pub fn add_point_disturbance(&mut self, pos: DVec2, val: f64) {
        let ix = self.axes.pos_to_idx_axis(pos.x, X);
        let iy = self.axes.pos_to_idx_axis(pos.y, Y);
        let [n_x, n_y, n_theta, _] = self.axes.dims;
        if ix >= 0 && (ix as usize) < n_x && iy >= 0 && (iy as usize) < n_y {
            for itheta in 0..n_theta {
                *self.amplitude.at_mut(ix as usize, iy as usize, itheta, 0) += val;
            }
        }
    }

    /// 波轨迹（诊断用）
    ///
    /// 以群速度推进单个相点，步长 dx/|v|，每步施加边界反射，
    /// 直到累计路径长度达到 `length`。主要用于检查边界反射。
    pub fn trajectory(&self, mut pos4: DVec4, length: f64) -> Vec<DVec4> {
        let mut points = Vec::new();
        let mut dist = 0.0;

        while dist <= length {
            points.push(pos4);

            let vel = self.group_velocity(pos4);
            let speed = vel.length();
            if speed == 0.0 {
                break;
            }
            let dt = self.axes.dx[X] / speed;

            pos4.x += dt * vel.x;
            pos4.y += dt * vel.y;
            pos4 = self.boundary_reflection(pos4);

            dist += dt * speed;
        }
        points.push(pos4);
        points
    }

    /// 在当前时刻重算全部波形缓冲
    ///
    /// 每条带以带中心 ± 半个 ζ 步长为积分区间。
    pub fn precompute_profile_buffers(&mut self) {
        let half_step = 0.5 * self.axes.dx[ZETA];
        for izeta in 0..self.axes.dim(ZETA) {
            let zeta = self.axes.idx_to_pos_axis(izeta as i64, ZETA);
            self.profile_buffers[izeta].precompute(
                &self.spectrum,
                self.time,
                zeta - half_step,
                zeta + half_step,
                self.config.profile_resolution,
                self.config.profile_periodicity,
                self.config.integration_nodes,
            );
        }
    }

    /// 各带的谱密度加权平均群速度
    ///
    /// 对带区间积分 cg(k)·S(ζ) 与 S(ζ)，取商。谱视为时不变，
    /// 只在构造时调用一次；若谱参数变为可变，需在变更后重算。
    fn precompute_group_speeds(&mut self) {
        let half_step = 0.5 * self.axes.dx[ZETA];
        let nodes = self.config.integration_nodes;
        let spectrum = self.spectrum;

        self.group_speeds = (0..self.axes.dim(ZETA))
            .map(|izeta| {
                let zeta = self.axes.idx_to_pos_axis(izeta as i64, ZETA);
                let moments: DVec2 =
                    integrate(nodes, zeta - half_step, zeta + half_step, |zeta| {
                        let knum = wave_number(zeta);
                        let density = spectrum.evaluate(zeta);
                        DVec2::new(deep_water_group_speed(knum) * density, density)
                    });
                moments.x / moments.y
            })
            .collect();
    }

    // ========================================================================
    // 坐标与物理量访问
    // ========================================================================

    /// ζ 带的群速度 [m/s]
    #[inline]
    pub fn group_speed(&self, izeta: usize) -> f64 {
        self.group_speeds[izeta]
    }

    /// 相点的群速度向量：大小为所在带的群速度，方向为 θ
    pub fn group_velocity(&self, pos4: DVec4) -> DVec2 {
        let n_zeta = self.axes.dim(ZETA) as i64;
        let izeta = self.axes.pos_to_idx_axis(pos4.w, ZETA).clamp(0, n_zeta - 1) as usize;
        self.group_speeds[izeta] * DVec2::new(pos4.z.cos(), pos4.z.sin())
    }

    /// ζ 带中心的波长 [m]
    pub fn band_wave_length(&self, izeta: usize) -> f64 {
        wave_length(self.axes.idx_to_pos_axis(izeta as i64, ZETA))
    }

    /// ζ 带中心的波数 [rad/m]
    pub fn band_wave_number(&self, izeta: usize) -> f64 {
        wave_number(self.axes.idx_to_pos_axis(izeta as i64, ZETA))
    }

    /// ζ 带的波形缓冲（渲染端查询周期与波形）
    pub fn profile_buffer(&self, izeta: usize) -> &ProfileBuffer {
        &self.profile_buffers[izeta]
    }

    /// 第 `dim` 轴的节点数
    #[inline]
    pub fn grid_dim(&self, dim: usize) -> usize {
        self.axes.dim(dim)
    }

    /// 第 `dim` 轴的步长
    #[inline]
    pub fn dx(&self, dim: usize) -> f64 {
        self.axes.dx[dim]
    }

    /// 轴边界与换算
    #[inline]
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// 当前模拟时间 [s]
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// 环境协作者
    #[inline]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// 内部幅度场采样器（扫描与查询共用）
    fn amplitude_field(&self) -> AmplitudeField<'_, E> {
        AmplitudeField {
            view: ExtendedView::new(&self.amplitude),
            axes: self.axes,
            environment: &self.environment,
        }
    }
}
