//! # mvside
//!
//! 纯 Rust 实现的解码器运动向量导出, 把各类视频解码器的运动补偿状态
//! 统一转换为帧附加数据, 供分析工具与滤镜使用.
//!
//! - **宏块划分型**: H.264, SVQ3, MPEG-1/2/4, H.263, VC-1
//! - **VP8**: 每宏块 4 个 8x8 块的简化模型
//! - **HEVC**: 覆盖整帧的 8x8 块网格
//!
//! # 快速开始
//!
//! ```rust
//! use mvside::codec::mv_export::{MbMotionInfo, MvExportContext, export_motion_vectors};
//! use mvside::codec::{CodecId, SideDataType, VideoFrame};
//! use mvside::core::ExportSideData;
//!
//! let ctx = MvExportContext::new(CodecId::H265, 16, 8).with_export_side_data(ExportSideData::MVS);
//! let grid = [[0i16, 0]; 2];
//! let info = MbMotionInfo { motion_val: [Some(&grid), None], ..Default::default() };
//!
//! let mut frame = VideoFrame::new(16, 8);
//! export_motion_vectors(&ctx, &mut frame, &info);
//! let sd = frame.side_data(SideDataType::MotionVectors).unwrap();
//! assert_eq!(sd.motion_vectors().unwrap().len(), 2);
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `mvside-core` | 错误类型与导出标志 |
//! | `mvside-codec` | 宏块类型、帧附加数据与运动向量导出 |

pub mod logging;

/// 核心类型 (对标 libavutil)
pub use mvside_core as core;

/// 运动向量导出 (对标 libavcodec 中的导出路径)
pub use mvside_codec as codec;

/// 获取 mvside 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
