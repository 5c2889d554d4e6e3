// crates/hl_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `HlError` 枚举和 `HlResult` 类型别名。
//!
//! # 设计原则
//!
//! 1. **构造期验证**: 退化配置（零尺寸网格、倒置的 zeta 区间）在构造时拒绝，
//!    不在模拟过程中处理
//! 2. **热路径无错误分配**: 数值扫描内部不产生 `Result`；
//!    越界的网格索引是编程错误，用断言直接终止

use thiserror::Error;

/// 统一结果类型
pub type HlResult<T> = Result<T, HlError>;

/// HaiLang 错误类型
#[derive(Error, Debug)]
pub enum HlError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 描述性错误信息
        message: String,
    },

    /// 无效参数
    #[error("无效参数 '{name}': {value} - {reason}")]
    InvalidParameter {
        /// 参数名
        name: String,
        /// 参数值
        value: String,
        /// 原因
        reason: String,
    },
}

impl HlError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建无效参数错误
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HlError::invalid_parameter("n_x", 0, "必须为正");
        let msg = err.to_string();
        assert!(msg.contains("n_x"));
        assert!(msg.contains("必须为正"));
    }

    #[test]
    fn test_config_error() {
        let err = HlError::config("zeta 区间倒置");
        assert!(err.to_string().contains("zeta"));
    }
}
