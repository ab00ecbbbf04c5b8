//! 运动向量网格遍历.
//!
//! 三种布局各对应一个遍历过程, 均按行优先顺序访问网格并把记录追加到输出缓冲区.
//! 输出顺序: 宏块行优先, 同一宏块内先方向 0 后方向 1, 再按子块序号递增.

use mvside_core::{MvsError, MvsResult};

use super::MbMotionInfo;
use super::buffer::MvBuffer;
use super::geometry::Partition;
use super::grid::MvGridLayout;
use super::record::build_record;
use crate::mb_type::MbType;

/// 按布局分派到对应的遍历过程
pub(super) fn walk(
    layout: &MvGridLayout,
    info: &MbMotionInfo<'_>,
    scale: i32,
    out: &mut MvBuffer,
) -> MvsResult<()> {
    match *layout {
        MvGridLayout::Partitioned {
            always_both_directions,
            ..
        } => {
            let mb_types = info.mb_types.ok_or_else(|| {
                MvsError::InvalidArgument("宏块划分型布局需要宏块类型表".into())
            })?;
            walk_partitioned(layout, info, mb_types, always_both_directions, scale, out)
        }
        MvGridLayout::Vp8 { .. } => walk_vp8(layout, info, scale, out),
        MvGridLayout::Hevc { blocks_x, blocks_y } => {
            walk_hevc(layout, info, blocks_x, blocks_y, scale, out)
        }
    }
}

/// 宏块划分型解码器 (H.264/SVQ3/MPEG/H.263/VC-1)
fn walk_partitioned(
    layout: &MvGridLayout,
    info: &MbMotionInfo<'_>,
    mb_types: &[u32],
    always_both_directions: bool,
    scale: i32,
    out: &mut MvBuffer,
) -> MvsResult<()> {
    for mb_y in 0..info.mb_height {
        for mb_x in 0..info.mb_width {
            let mb_index = mb_x + mb_y * info.mb_stride;
            let raw = *mb_types.get(mb_index).ok_or_else(|| {
                MvsError::InvalidData(format!(
                    "宏块类型表越界: 索引 {mb_index}, 长度 {}",
                    mb_types.len()
                ))
            })?;
            let mb_type = MbType::from_raw(raw);
            let geometry = layout.resolve_geometry(mb_type);
            let partition = geometry.partition;

            for direction in 0..2 {
                // VC-1 的列表使用标志不反映实际预测方向, 两个方向都要处理
                if !always_both_directions && !mb_type.uses_list(direction) {
                    continue;
                }
                let Some(grid) = info.motion_val[direction] else {
                    continue;
                };
                for (sub, &(off_x, off_y)) in partition.sub_block_offsets().iter().enumerate() {
                    let xy = layout.index(partition, mb_x, mb_y, sub);
                    let (mx, mut my) = read_motion(grid, xy, direction)?;
                    if geometry.field_to_frame {
                        my *= 2;
                    }
                    let dst = (mb_x as i32 * 16 + off_x, mb_y as i32 * 16 + off_y);
                    out.push(build_record(partition, dst, (mx, my), scale, direction))?;
                }
            }
        }
    }
    Ok(())
}

/// VP8: 只取方向 0, 每个宏块固定视为 4 个 8x8 子块
fn walk_vp8(
    layout: &MvGridLayout,
    info: &MbMotionInfo<'_>,
    scale: i32,
    out: &mut MvBuffer,
) -> MvsResult<()> {
    let Some(grid) = info.motion_val[0] else {
        return Ok(());
    };
    let partition = layout.resolve_geometry(MbType::empty()).partition;
    for mb_y in 0..info.mb_height {
        for mb_x in 0..info.mb_width {
            for (sub, &(off_x, off_y)) in partition.sub_block_offsets().iter().enumerate() {
                let xy = layout.index(partition, mb_x, mb_y, sub);
                let motion = read_motion(grid, xy, 0)?;
                let dst = (mb_x as i32 * 16 + off_x, mb_y as i32 * 16 + off_y);
                out.push(build_record(partition, dst, motion, scale, 0))?;
            }
        }
    }
    Ok(())
}

/// HEVC: 只取方向 0, 遍历整帧的 8x8 块, 目标位置为块左上角
fn walk_hevc(
    layout: &MvGridLayout,
    info: &MbMotionInfo<'_>,
    blocks_x: usize,
    blocks_y: usize,
    scale: i32,
    out: &mut MvBuffer,
) -> MvsResult<()> {
    let Some(grid) = info.motion_val[0] else {
        return Ok(());
    };
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let xy = layout.index(Partition::Split8x8, bx, by, 0);
            let motion = read_motion(grid, xy, 0)?;
            let dst = (bx as i32 * 8, by as i32 * 8);
            out.push(build_record(Partition::Split8x8, dst, motion, scale, 0))?;
        }
    }
    Ok(())
}

fn read_motion(grid: &[[i16; 2]], xy: usize, direction: usize) -> MvsResult<(i32, i32)> {
    grid.get(xy)
        .map(|&[x, y]| (i32::from(x), i32::from(y)))
        .ok_or_else(|| {
            MvsError::InvalidData(format!(
                "方向 {direction} 运动向量网格越界: 索引 {xy}, 长度 {}",
                grid.len()
            ))
        })
}
