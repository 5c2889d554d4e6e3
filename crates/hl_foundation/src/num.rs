// crates/hl_foundation/src/num.rs

//! 数值工具
//!
//! 周期性索引运算与公用数值常量。

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// 非负模运算
///
/// `%` 对负数返回负余数，周期性索引（角度环绕、周期缓冲）需要
/// 落在 `[0, d)` 内的结果。
///
/// # 示例
///
/// ```
/// use hl_foundation::num::pos_modulo;
///
/// assert_eq!(pos_modulo(-1, 16), 15);
/// assert_eq!(pos_modulo(17, 16), 1);
/// ```
pub const fn pos_modulo(n: i64, d: i64) -> i64 {
    (n % d + d) % d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_modulo_negative() {
        assert_eq!(pos_modulo(-1, 8), 7);
        assert_eq!(pos_modulo(-8, 8), 0);
        assert_eq!(pos_modulo(-9, 8), 7);
    }

    #[test]
    fn test_pos_modulo_positive() {
        assert_eq!(pos_modulo(0, 8), 0);
        assert_eq!(pos_modulo(7, 8), 7);
        assert_eq!(pos_modulo(8, 8), 0);
        assert_eq!(pos_modulo(15, 8), 7);
    }
}
