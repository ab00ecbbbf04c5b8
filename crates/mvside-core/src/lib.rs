//! # mvside-core
//!
//! mvside 核心库, 提供统一错误类型与附加数据导出标志.
//!
//! 本 crate 对标 FFmpeg 的 libavutil 中与运动向量导出相关的基础设施.

pub mod error;
pub mod export_flags;

// 重导出常用类型
pub use error::{MvsError, MvsResult};
pub use export_flags::ExportSideData;
