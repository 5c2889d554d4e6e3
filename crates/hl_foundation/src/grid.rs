// crates/hl_foundation/src/grid.rs

//! 稠密 4D 网格容器
//!
//! 按 `i3 + d3·(i2 + d2·(i1 + d1·i0))` 扁平化存储，即最后一个维度
//! 变化最快、第一个维度变化最慢。求解器据此按第一维（x 行）切分
//! 扫描任务并行写入。
//!
//! # 错误模型
//!
//! 越界访问是编程错误而非可恢复条件，用 `assert!` 直接终止。
//! 活跃模拟中不得调用 [`Grid::resize`]，调用方必须在步进前完成分配。

/// 稠密 4D 实数数组
///
/// 双缓冲约定：一对 `Grid` 之间的交换通过 [`std::mem::swap`] 完成，
/// 只交换所有权句柄，从不逐步重新分配。
#[derive(Debug, Clone, Default)]
pub struct Grid {
    data: Vec<f64>,
    dims: [usize; 4],
}

impl Grid {
    /// 创建空网格（四个维度均为 0）
    pub fn new() -> Self {
        Self::default()
    }

    /// 重新分配为 `n0 × n1 × n2 × n3` 并全部清零
    pub fn resize(&mut self, n0: usize, n1: usize, n2: usize, n3: usize) {
        self.dims = [n0, n1, n2, n3];
        self.data.clear();
        self.data.resize(n0 * n1 * n2 * n3, 0.0);
    }

    /// 扁平化索引，带边界断言
    #[inline]
    fn flat_index(&self, i0: usize, i1: usize, i2: usize, i3: usize) -> usize {
        assert!(
            i0 < self.dims[0] && i1 < self.dims[1] && i2 < self.dims[2] && i3 < self.dims[3],
            "网格索引越界: ({}, {}, {}, {}) 超出 {:?}",
            i0,
            i1,
            i2,
            i3,
            self.dims
        );
        i3 + self.dims[3] * (i2 + self.dims[2] * (i1 + self.dims[1] * i0))
    }

    /// 读取元素
    #[inline]
    pub fn at(&self, i0: usize, i1: usize, i2: usize, i3: usize) -> f64 {
        self.data[self.flat_index(i0, i1, i2, i3)]
    }

    /// 可变访问元素
    #[inline]
    pub fn at_mut(&mut self, i0: usize, i1: usize, i2: usize, i3: usize) -> &mut f64 {
        let idx = self.flat_index(i0, i1, i2, i3);
        &mut self.data[idx]
    }

    /// 第 `dim` 个维度的大小
    #[inline]
    pub fn dimension(&self, dim: usize) -> usize {
        self.dims[dim]
    }

    /// 四个维度
    #[inline]
    pub fn dimensions(&self) -> [usize; 4] {
        self.dims
    }

    /// 元素总数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 只读切片视图
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// 可变切片视图，供并行扫描按行切分写入
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_zero_initializes() {
        let mut grid = Grid::new();
        grid.resize(2, 3, 4, 5);
        assert_eq!(grid.len(), 120);
        assert!(grid.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_flattened_layout() {
        // 最后一维变化最快
        let mut grid = Grid::new();
        grid.resize(2, 2, 2, 2);
        *grid.at_mut(1, 0, 1, 1) = 7.0;
        let flat = 1 + 2 * (1 + 2 * (0 + 2 * 1));
        assert_eq!(grid.as_slice()[flat], 7.0);
        assert_eq!(grid.at(1, 0, 1, 1), 7.0);
    }

    #[test]
    fn test_dimension() {
        let mut grid = Grid::new();
        grid.resize(10, 11, 12, 13);
        assert_eq!(grid.dimension(0), 10);
        assert_eq!(grid.dimension(3), 13);
        assert_eq!(grid.dimensions(), [10, 11, 12, 13]);
    }

    #[test]
    #[should_panic(expected = "网格索引越界")]
    fn test_out_of_range_faults() {
        let mut grid = Grid::new();
        grid.resize(2, 2, 2, 2);
        grid.at(2, 0, 0, 0);
    }

    #[test]
    fn test_swap_is_cheap_handle_swap() {
        let mut a = Grid::new();
        let mut b = Grid::new();
        a.resize(1, 1, 1, 1);
        b.resize(1, 1, 1, 1);
        *a.at_mut(0, 0, 0, 0) = 1.0;
        std::mem::swap(&mut a, &mut b);
        assert_eq!(b.at(0, 0, 0, 0), 1.0);
        assert_eq!(a.at(0, 0, 0, 0), 0.0);
    }
}
