//! 统一错误类型定义.
//!
//! 所有 mvside crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// mvside 统一错误类型
#[derive(Debug, Error)]
pub enum MvsError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的操作
    #[error("不支持的操作: {0}")]
    Unsupported(String),

    /// 无效数据 (解码器状态损坏、附加数据长度错误等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 内存分配失败
    #[error("内存分配失败: {0}")]
    OutOfMemory(String),

    /// 内部错误 (不应发生)
    #[error("内部错误: {0}")]
    Internal(String),
}

/// mvside 统一 Result 类型
pub type MvsResult<T> = Result<T, MvsError>;
