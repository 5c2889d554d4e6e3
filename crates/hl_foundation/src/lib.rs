// crates/hl_foundation/src/lib.rs

//! HaiLang Foundation Layer
//!
//! 波浪求解器的基础层，不含任何物理语义。
//!
//! # 模块概览
//!
//! - [`grid`]: 稠密 4D 数组容器，带边界检查的扁平化访问
//! - [`interpolation`]: 可组合的逐轴插值策略（最近邻/线性/三次）
//!   以及多轴组合与域掩码组合
//! - [`integration`]: 固定节点中点积分
//! - [`num`]: 正模运算等数值工具
//! - [`error`]: 统一错误类型
//!
//! # 设计原则
//!
//! 1. **无物理依赖**: 本层只提供容器与数值组合子，物理语义在 `hl_waves` 中
//! 2. **无状态可并发**: 插值与积分过闭包捕获的状态全部为不可变借用，
//!    可在并行扫描中安全重复调用
//! 3. **确定性**: 相同输入必得相同输出，无随机性、无重试逻辑

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod grid;
pub mod integration;
pub mod interpolation;
pub mod num;

// 重导出常用类型
pub use error::{HlError, HlResult};
pub use grid::Grid;
pub use integration::integrate;
pub use interpolation::{interpolate4, interpolate4_masked, AxisScheme, InterpValue};
pub use num::pos_modulo;
