//! 运动向量网格布局.
//!
//! 不同解码器以不同的密度与步长存放运动向量. 每次导出时按编解码器标识
//! 选定一种布局, 之后由布局负责几何解析与网格索引计算.

use mvside_core::{MvsError, MvsResult};

use super::geometry::{BlockGeometry, Partition};
use crate::codec_id::CodecId;
use crate::mb_type::MbType;

/// 运动向量网格布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MvGridLayout {
    /// 宏块划分型 (H.264/SVQ3/MPEG-1/2/4/H.263/VC-1)
    Partitioned {
        /// 每宏块每方向的采样密度 (log2): 4x4 块存储为 2, 8x8 块存储为 1
        sample_log2: u32,
        /// 网格行步长 (以网格单元计)
        stride: usize,
        /// 忽略参考列表使用标志, 总是处理两个方向 (VC-1)
        always_both_directions: bool,
    },
    /// VP8 简化模型: 每宏块 4 个 8x8 块, 行步长为宏块宽度
    Vp8 { mb_width: usize },
    /// HEVC 平铺 8x8 块网格, 覆盖整帧
    Hevc { blocks_x: usize, blocks_y: usize },
}

impl MvGridLayout {
    /// 按编解码器标识选择布局
    ///
    /// `mb_width` 用于宏块型布局, `width`/`height` 为帧像素尺寸, 用于 HEVC.
    pub fn select(codec_id: CodecId, mb_width: usize, width: u32, height: u32) -> MvsResult<Self> {
        match codec_id {
            CodecId::H264
            | CodecId::Svq3
            | CodecId::Mpeg1Video
            | CodecId::Mpeg2Video
            | CodecId::Mpeg4
            | CodecId::H263
            | CodecId::Vc1 => {
                let sample_log2 = match codec_id {
                    CodecId::H264 | CodecId::Svq3 => 2,
                    _ => 1,
                };
                // H.264 网格无右侧填充列, 其余解码器多一列
                let padding = if codec_id == CodecId::H264 { 0 } else { 1 };
                Ok(Self::Partitioned {
                    sample_log2,
                    stride: (mb_width << sample_log2) + padding,
                    always_both_directions: codec_id == CodecId::Vc1,
                })
            }
            CodecId::Vp8 => Ok(Self::Vp8 { mb_width }),
            CodecId::H265 => Ok(Self::Hevc {
                blocks_x: (width / 8) as usize,
                blocks_y: (height / 8) as usize,
            }),
            other => Err(MvsError::Unsupported(format!(
                "编解码器 {other} 不支持运动向量导出"
            ))),
        }
    }

    /// 是否需要宏块类型表
    pub const fn needs_mb_types(&self) -> bool {
        matches!(self, Self::Partitioned { .. })
    }

    /// 最坏情况下的记录数上限, 溢出时返回 None
    ///
    /// 宏块型与 VP8: 宏块数 x 2 方向 x 4 子块; HEVC: 块数 x 2.
    pub fn max_records(&self, mb_width: usize, mb_height: usize) -> Option<usize> {
        match *self {
            Self::Partitioned { .. } | Self::Vp8 { .. } => {
                mb_width.checked_mul(mb_height)?.checked_mul(2 * 4)
            }
            Self::Hevc { blocks_x, blocks_y } => blocks_x.checked_mul(blocks_y)?.checked_mul(2),
        }
    }

    /// 解析宏块几何; 平铺布局恒为 8x8
    pub const fn resolve_geometry(&self, mb_type: MbType) -> BlockGeometry {
        match self {
            Self::Partitioned { .. } => BlockGeometry::resolve(mb_type),
            Self::Vp8 { .. } | Self::Hevc { .. } => BlockGeometry::FLAT_8X8,
        }
    }

    /// 计算子块 `sub` 在运动向量网格中的平铺索引
    ///
    /// HEVC 布局下 `(mb_x, mb_y)` 为 8x8 块坐标, `sub` 被忽略.
    pub const fn index(&self, partition: Partition, mb_x: usize, mb_y: usize, sub: usize) -> usize {
        match *self {
            Self::Partitioned {
                sample_log2,
                stride,
                ..
            } => match partition {
                Partition::Split8x8 => {
                    ((mb_x * 2 + (sub & 1)) + (mb_y * 2 + (sub >> 1)) * stride)
                        << (sample_log2 - 1)
                }
                Partition::Split16x8 => (mb_x * 2 + (mb_y * 2 + sub) * stride) << (sample_log2 - 1),
                Partition::Split8x16 => (mb_x * 2 + sub + mb_y * 2 * stride) << (sample_log2 - 1),
                Partition::Whole16x16 => (mb_x + mb_y * stride) << sample_log2,
            },
            Self::Vp8 { mb_width } => (2 * mb_x + (sub & 1)) + (2 * mb_y + (sub >> 1)) * mb_width,
            Self::Hevc { blocks_x, .. } => mb_x + mb_y * blocks_x,
        }
    }
}
