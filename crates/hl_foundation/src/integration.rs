// crates/hl_foundation/src/integration.rs

//! 固定节点中点积分
//!
//! 精度仅由节点数控制，完全确定性。被积函数通过 `FnMut` 传入，
//! 返回值可以是任意 [`InterpValue`]（标量或向量同时积分）。

use crate::interpolation::InterpValue;

/// 中点法数值积分
///
/// 把 `[x_min, x_max]` 等分为 `nodes` 个小区间，在每个区间中点
/// 求值 `f` 并按区间宽度累加。
///
/// # Panics
///
/// `nodes == 0` 是前置条件违反（debug 断言）。
pub fn integrate<V, F>(nodes: usize, x_min: f64, x_max: f64, mut f: F) -> V
where
    V: InterpValue,
    F: FnMut(f64) -> V,
{
    debug_assert!(nodes > 0, "积分节点数必须为正");

    let dx = (x_max - x_min) / nodes as f64;
    let mut x = x_min + 0.5 * dx;

    let mut result = f(x) * dx;
    for _ in 1..nodes {
        x += dx;
        result = result + f(x) * dx;
    }

    result
}
