//! 运动向量记录构建.

use super::geometry::Partition;
use crate::motion_vector::MotionVector;

/// 根据划分形状、目标位置与原始运动分量构建一条记录
///
/// 源位置 = 目标位置 + 运动分量 / 分母, 整数除法向零截断.
/// 坐标按记录布局收窄为 16 位.
pub fn build_record(
    partition: Partition,
    dst: (i32, i32),
    motion: (i32, i32),
    scale: i32,
    direction: usize,
) -> MotionVector {
    let (dst_x, dst_y) = dst;
    let (motion_x, motion_y) = motion;
    MotionVector {
        source: if direction != 0 { 1 } else { -1 },
        w: partition.width(),
        h: partition.height(),
        src_x: (dst_x + motion_x / scale) as i16,
        src_y: (dst_y + motion_y / scale) as i16,
        dst_x: dst_x as i16,
        dst_y: dst_y as i16,
        flags: 0,
        motion_x,
        motion_y,
        motion_scale: scale as u16,
    }
}

/// 亚像素分母: 1/4 像素精度为 4, 半像素为 2
pub const fn motion_scale(quarter_sample: bool) -> i32 {
    let shift = 1 + quarter_sample as u32;
    1 << shift
}
