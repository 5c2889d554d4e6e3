// crates/hl_waves/src/wave_grid/axes.rs

//! 相空间坐标轴
//!
//! 四个轴的边界、步长与逆步长，以及网格索引 ↔ 物理坐标的换算。
//! 节点位于单元中心：`pos = min + (idx + 0.5)·dx`，因此 θ₀ = 0.5·dθ。

use glam::{DVec2, DVec4};

use super::{THETA, X, Y, ZETA};

/// 轴边界与离散化参数
///
/// x, y ∈ [−size, size]；θ ∈ [0, 2π) 周期；ζ ∈ [谱下界, 谱上界]。
#[derive(Debug, Clone, Copy)]
pub struct Axes {
    /// 各轴下界
    pub x_min: [f64; 4],
    /// 各轴上界
    pub x_max: [f64; 4],
    /// 各轴步长
    pub dx: [f64; 4],
    /// 各轴逆步长
    pub inv_dx: [f64; 4],
    /// 各轴节点数
    pub dims: [usize; 4],
}

impl Axes {
    /// 由边界与节点数派生步长
    pub fn new(x_min: [f64; 4], x_max: [f64; 4], dims: [usize; 4]) -> Self {
        let mut dx = [0.0; 4];
        let mut inv_dx = [0.0; 4];
        for dim in 0..4 {
            dx[dim] = (x_max[dim] - x_min[dim]) / dims[dim] as f64;
            inv_dx[dim] = 1.0 / dx[dim];
        }
        Self {
            x_min,
            x_max,
            dx,
            inv_dx,
            dims,
        }
    }

    /// 单轴：索引 → 单元中心坐标
    #[inline]
    pub fn idx_to_pos_axis(&self, idx: i64, dim: usize) -> f64 {
        self.x_min[dim] + (idx as f64 + 0.5) * self.dx[dim]
    }

    /// 四轴：索引 → 坐标
    #[inline]
    pub fn idx_to_pos(&self, idx: [i64; 4]) -> DVec4 {
        DVec4::new(
            self.idx_to_pos_axis(idx[X], X),
            self.idx_to_pos_axis(idx[Y], Y),
            self.idx_to_pos_axis(idx[THETA], THETA),
            self.idx_to_pos_axis(idx[ZETA], ZETA),
        )
    }

    /// 单轴：坐标 → 连续网格坐标（整数值正落在节点上）
    #[inline]
    pub fn pos_to_grid_axis(&self, pos: f64, dim: usize) -> f64 {
        (pos - self.x_min[dim]) * self.inv_dx[dim] - 0.5
    }

    /// 四轴：坐标 → 连续网格坐标
    #[inline]
    pub fn pos_to_grid(&self, pos4: DVec4) -> DVec4 {
        DVec4::new(
            self.pos_to_grid_axis(pos4.x, X),
            self.pos_to_grid_axis(pos4.y, Y),
            self.pos_to_grid_axis(pos4.z, THETA),
            self.pos_to_grid_axis(pos4.w, ZETA),
        )
    }

    /// 单轴：坐标 → 最近节点索引
    #[inline]
    pub fn pos_to_idx_axis(&self, pos: f64, dim: usize) -> i64 {
        self.pos_to_grid_axis(pos, dim).round() as i64
    }

    /// 四轴：坐标 → 最近节点索引
    #[inline]
    pub fn pos_to_idx(&self, pos4: DVec4) -> [i64; 4] {
        [
            self.pos_to_idx_axis(pos4.x, X),
            self.pos_to_idx_axis(pos4.y, Y),
            self.pos_to_idx_axis(pos4.z, THETA),
            self.pos_to_idx_axis(pos4.w, ZETA),
        ]
    }

    /// 空间节点 (ix, iy) 的物理位置
    #[inline]
    pub fn node_position(&self, ix: i64, iy: i64) -> DVec2 {
        DVec2::new(self.idx_to_pos_axis(ix, X), self.idx_to_pos_axis(iy, Y))
    }

    /// 第 `dim` 轴的节点数
    #[inline]
    pub fn dim(&self, dim: usize) -> usize {
        self.dims[dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn test_axes() -> Axes {
        Axes::new(
            [-50.0, -50.0, 0.0, -5.0],
            [50.0, 50.0, TAU, 3.3],
            [100, 100, 16, 4],
        )
    }

    #[test]
    fn test_idx_pos_roundtrip_on_interior_nodes() {
        // posToGrid(idxToPos(i)) 在浮点容差内恢复 i
        let axes = test_axes();
        for dim in 0..4 {
            for idx in [0_i64, 1, axes.dims[dim] as i64 / 2, axes.dims[dim] as i64 - 1] {
                let pos = axes.idx_to_pos_axis(idx, dim);
                let grid = axes.pos_to_grid_axis(pos, dim);
                assert_relative_eq!(grid, idx as f64, epsilon = 1e-9);
                assert_eq!(axes.pos_to_idx_axis(pos, dim), idx);
            }
        }
    }

    #[test]
    fn test_pos_idx_pos_within_half_cell() {
        // idxToPos(posToIdx(p)) 落在 p 的半个单元宽度内
        let axes = test_axes();
        for dim in 0..2 {
            for i in 0..50 {
                let p = -49.0 + i as f64 * 1.97;
                let snapped = axes.idx_to_pos_axis(axes.pos_to_idx_axis(p, dim), dim);
                assert!((snapped - p).abs() <= 0.5 * axes.dx[dim] + 1e-9);
            }
        }
    }

    #[test]
    fn test_node_centers_offset_half_step() {
        let axes = test_axes();
        assert_relative_eq!(axes.idx_to_pos_axis(0, THETA), 0.5 * axes.dx[THETA]);
        assert_relative_eq!(axes.idx_to_pos_axis(0, X), -50.0 + 0.5 * axes.dx[X]);
    }

    #[test]
    fn test_inv_dx_is_reciprocal() {
        let axes = test_axes();
        for dim in 0..4 {
            assert_relative_eq!(axes.dx[dim] * axes.inv_dx[dim], 1.0, epsilon = 1e-12);
        }
    }
}
