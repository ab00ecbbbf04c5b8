//! 宏块划分几何.
//!
//! 根据宏块类型码确定块尺寸与各子块在宏块内的中心偏移.

use crate::mb_type::MbType;

/// 宏块划分形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// 四个 8x8 子块
    Split8x8,
    /// 上下两个 16x8 子块
    Split16x8,
    /// 左右两个 8x16 子块
    Split8x16,
    /// 整宏块 16x16
    Whole16x16,
}

/// 8x8 子块偏移: 左上, 右上, 左下, 右下
const OFFSETS_8X8: [(i32, i32); 4] = [(4, 4), (12, 4), (4, 12), (12, 12)];
/// 16x8 子块偏移: 上, 下
const OFFSETS_16X8: [(i32, i32); 2] = [(8, 4), (8, 12)];
/// 8x16 子块偏移: 左, 右
const OFFSETS_8X16: [(i32, i32); 2] = [(4, 8), (12, 8)];
const OFFSETS_16X16: [(i32, i32); 1] = [(8, 8)];

impl Partition {
    /// 按 8x8, 16x8, 8x16, 整块的顺序判定, 先命中者优先
    pub const fn classify(mb_type: MbType) -> Self {
        if mb_type.is_8x8() {
            Self::Split8x8
        } else if mb_type.is_16x8() {
            Self::Split16x8
        } else if mb_type.is_8x16() {
            Self::Split8x16
        } else {
            Self::Whole16x16
        }
    }

    /// 块宽度 (像素)
    pub const fn width(&self) -> u8 {
        match self {
            Self::Split8x8 | Self::Split8x16 => 8,
            Self::Split16x8 | Self::Whole16x16 => 16,
        }
    }

    /// 块高度 (像素)
    pub const fn height(&self) -> u8 {
        match self {
            Self::Split8x8 | Self::Split16x8 => 8,
            Self::Split8x16 | Self::Whole16x16 => 16,
        }
    }

    /// 子块相对宏块左上角的中心偏移, 按输出顺序排列
    pub const fn sub_block_offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Self::Split8x8 => &OFFSETS_8X8,
            Self::Split16x8 => &OFFSETS_16X8,
            Self::Split8x16 => &OFFSETS_8X16,
            Self::Whole16x16 => &OFFSETS_16X16,
        }
    }

    /// 场宏块对的 16x8/8x16 划分, 垂直分量以场为单位, 需乘 2 换算到帧
    pub const fn doubles_vertical_motion(&self, mb_type: MbType) -> bool {
        matches!(self, Self::Split16x8 | Self::Split8x16) && mb_type.is_interlaced()
    }
}

/// 单个宏块解析后的几何信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGeometry {
    pub partition: Partition,
    /// 垂直运动分量是否需要加倍
    pub field_to_frame: bool,
}

impl BlockGeometry {
    pub const fn resolve(mb_type: MbType) -> Self {
        let partition = Partition::classify(mb_type);
        Self {
            partition,
            field_to_frame: partition.doubles_vertical_motion(mb_type),
        }
    }

    /// 固定 8x8 (VP8/HEVC 平铺网格)
    pub const FLAT_8X8: Self = Self {
        partition: Partition::Split8x8,
        field_to_frame: false,
    };
}
