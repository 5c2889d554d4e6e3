// crates/hl_waves/src/environment.rs

//! 域成员与边界几何
//!
//! 求解器通过本接口询问外部协作者：某点是否在计算域内、到边界的
//! 有符号距离、以及边界法线（水平集梯度）。水平集的零等值线即边界，
//! 域外为负。
//!
//! 实现必须是 `Sync`：平流/扩散扫描在并行节点循环内反复调用。

use glam::DVec2;

/// 环境接口（外部协作者）
pub trait Environment: Sync {
    /// 点是否在计算域内
    fn in_domain(&self, pos: DVec2) -> bool;

    /// 水平集值：到边界的有符号距离，域外为负
    fn levelset(&self, pos: DVec2) -> f64;

    /// 水平集梯度：边界法线的近似单位向量
    fn levelset_grad(&self, pos: DVec2) -> DVec2;
}

/// 无边界开阔海域
///
/// 整个平面都在域内，反射与近边界扩散抑制永不触发。
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOcean;

impl Environment for OpenOcean {
    fn in_domain(&self, _pos: DVec2) -> bool {
        true
    }

    fn levelset(&self, _pos: DVec2) -> f64 {
        f64::MAX
    }

    fn levelset_grad(&self, _pos: DVec2) -> DVec2 {
        DVec2::X
    }
}

/// 圆形岛屿障碍
///
/// 计算域为圆外侧，水平集为到圆周的解析有符号距离。
#[derive(Debug, Clone, Copy)]
pub struct CircularIsland {
    /// 圆心
    pub center: DVec2,
    /// 半径 [m]
    pub radius: f64,
}

impl CircularIsland {
    /// 以圆心与半径创建
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Environment for CircularIsland {
    fn in_domain(&self, pos: DVec2) -> bool {
        self.levelset(pos) >= 0.0
    }

    fn levelset(&self, pos: DVec2) -> f64 {
        (pos - self.center).length() - self.radius
    }

    fn levelset_grad(&self, pos: DVec2) -> DVec2 {
        let d = pos - self.center;
        let len = d.length();
        if len > 0.0 {
            d / len
        } else {
            // 圆心处梯度退化，取任意单位方向
            DVec2::X
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_open_ocean_everywhere_in_domain() {
        let env = OpenOcean;
        assert!(env.in_domain(DVec2::new(1e6, -1e6)));
        assert!(env.levelset(DVec2::ZERO) > 0.0);
    }

    #[test]
    fn test_island_signed_distance() {
        let env = CircularIsland::new(DVec2::ZERO, 10.0);
        assert_relative_eq!(env.levelset(DVec2::new(15.0, 0.0)), 5.0, epsilon = 1e-12);
        assert_relative_eq!(env.levelset(DVec2::new(5.0, 0.0)), -5.0, epsilon = 1e-12);
        assert!(env.in_domain(DVec2::new(20.0, 0.0)));
        assert!(!env.in_domain(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_island_grad_is_unit_outward() {
        let env = CircularIsland::new(DVec2::new(2.0, 0.0), 3.0);
        let g = env.levelset_grad(DVec2::new(10.0, 0.0));
        assert_relative_eq!(g.length(), 1.0, epsilon = 1e-12);
        assert!(g.x > 0.0);
    }
}
