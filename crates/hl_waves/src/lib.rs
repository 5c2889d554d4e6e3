// crates/hl_waves/src/lib.rs

//! HaiLang 波浪求解器
//!
//! 在 (x, y, θ, ζ) 四维相空间上模拟海浪能谱的时间演化，并由谱重建
//! 位移后的水面。ζ 是波长的 log2，θ 是波矢方向。
//!
//! # 模块概览
//!
//! - [`spectrum`]: Pierson-Moskowitz 谱密度（ζ 空间），纯函数
//! - [`environment`]: 域成员与边界几何（水平集）的外部协作者接口
//! - [`profile_buffer`]: 按 ζ 带预计算的周期性 Gerstner 波形查找表
//! - [`wave_grid`]: 主求解器，半拉格朗日平流、角向扩散、水面重建
//! - [`config`]: 求解器配置
//! - [`dispersion`]: 深水色散关系与波数换算
//!
//! # 数据流
//!
//! 谱 + 中点积分 → 各带群速度与波形缓冲（由 [`wave_grid::WaveGrid`] 计算）；
//! 波能网格 + 环境 → 平流/扩散；波能网格 + 波形缓冲 → 水面位移与法线查询。
//!
//! # 并发模型
//!
//! 平流与扩散扫描按 (x, y) 节点数据并行（rayon），读当前缓冲、写
//! 影子缓冲，全扫描结束后一次交换。除此之外无任何锁。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dispersion;
pub mod environment;
pub mod profile_buffer;
pub mod spectrum;
pub mod wave_grid;

pub use config::WaveGridConfig;
pub use environment::{CircularIsland, Environment, OpenOcean};
pub use profile_buffer::ProfileBuffer;
pub use spectrum::Spectrum;
pub use wave_grid::{Axes, WaveGrid, THETA, X, Y, ZETA};
