//! 运动向量导出.
//!
//! 在一帧解码完成后, 把解码器内部的宏块类型表与运动向量网格转换为统一的
//! [`MotionVector`](crate::motion_vector::MotionVector) 数组, 作为
//! [`SideDataType::MotionVectors`] 附加数据挂到帧上.
//!
//! 流程: 选择网格布局 -> 按最坏情况分配缓冲区 -> 遍历网格 -> 拷贝到帧附加数据.
//! 任何失败都在本模块内记录日志并吸收, 对调用方只表现为"帧上没有运动向量".

pub mod buffer;
mod driver;
pub mod geometry;
pub mod grid;
pub mod record;

#[cfg(test)]
mod tests;

use log::{debug, error, warn};
use mvside_core::{ExportSideData, MvsError, MvsResult};

use crate::codec_id::CodecId;
use crate::frame::{SideDataType, VideoFrame};
use buffer::MvBuffer;
use grid::MvGridLayout;
use record::motion_scale;

/// 导出上下文 (解码器上下文中与导出相关的字段)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvExportContext {
    /// 当前解码器
    pub codec_id: CodecId,
    /// 附加数据导出标志
    pub export_side_data: ExportSideData,
    /// 帧宽度 (像素)
    pub width: u32,
    /// 帧高度 (像素)
    pub height: u32,
    /// 已输出帧序号, 仅用于日志
    pub frame_number: u64,
}

impl MvExportContext {
    /// 创建导出上下文, 默认不启用任何导出
    pub fn new(codec_id: CodecId, width: u32, height: u32) -> Self {
        Self {
            codec_id,
            export_side_data: ExportSideData::empty(),
            width,
            height,
            frame_number: 0,
        }
    }

    pub fn with_export_side_data(mut self, flags: ExportSideData) -> Self {
        self.export_side_data = flags;
        self
    }

    pub fn with_frame_number(mut self, frame_number: u64) -> Self {
        self.frame_number = frame_number;
        self
    }
}

/// 一帧的宏块运动信息, 借用自解码器
///
/// `motion_val[d]` 为方向 d 的运动向量网格, 元素为亚像素单位的 (x, y).
/// 缺失的方向整体跳过; 方向 0 缺失时不导出任何内容.
#[derive(Debug, Clone, Copy, Default)]
pub struct MbMotionInfo<'a> {
    /// 宏块列数
    pub mb_width: usize,
    /// 宏块行数
    pub mb_height: usize,
    /// 宏块类型表行步长
    pub mb_stride: usize,
    /// 运动向量是否为 1/4 像素精度 (否则为半像素)
    pub quarter_sample: bool,
    /// 宏块类型表, 宏块划分型解码器必需
    pub mb_types: Option<&'a [u32]>,
    /// 两个方向的运动向量网格
    pub motion_val: [Option<&'a [[i16; 2]]>; 2],
}

/// 遍历解码器状态, 返回填充好的运动向量缓冲区
///
/// 前置条件不满足 (未启用导出、缺少网格、编解码器不支持) 时返回 `Ok(None)`.
pub fn extract_motion_vectors(
    ctx: &MvExportContext,
    info: &MbMotionInfo<'_>,
) -> MvsResult<Option<MvBuffer>> {
    if !ctx.export_side_data.exports_mvs() || info.motion_val[0].is_none() {
        return Ok(None);
    }
    let layout = match MvGridLayout::select(ctx.codec_id, info.mb_width, ctx.width, ctx.height) {
        Ok(layout) => layout,
        Err(e) => {
            debug!("跳过运动向量导出: {e}");
            return Ok(None);
        }
    };
    if layout.needs_mb_types() && info.mb_types.is_none() {
        return Ok(None);
    }

    let capacity = layout
        .max_records(info.mb_width, info.mb_height)
        .ok_or_else(|| {
            MvsError::OutOfMemory(format!(
                "运动向量上限溢出: {}x{} 宏块",
                info.mb_width, info.mb_height
            ))
        })?;
    let mut buffer = MvBuffer::with_capacity(capacity)?;
    driver::walk(&layout, info, motion_scale(info.quarter_sample), &mut buffer)?;
    Ok(Some(buffer))
}

/// 导出运动向量并挂到帧上
///
/// 没有产生任何记录时不挂载附加数据. 所有错误只记录日志, 失败时帧保持不变.
pub fn export_motion_vectors(
    ctx: &MvExportContext,
    frame: &mut VideoFrame,
    info: &MbMotionInfo<'_>,
) {
    let buffer = match extract_motion_vectors(ctx, info) {
        Ok(Some(buffer)) => buffer,
        Ok(None) => return,
        Err(e) => {
            error!("运动向量导出失败 ({}): {e}", ctx.codec_id);
            return;
        }
    };
    if buffer.is_empty() {
        return;
    }
    if let Err(e) = attach(ctx, frame, &buffer) {
        error!("挂载运动向量附加数据失败: {e}");
    }
}

/// 带前置条件诊断的导出入口
///
/// 与 [`export_motion_vectors`] 行为一致, 但会以 warn 级别说明为何没有导出.
pub fn export_motion_vectors_checked(
    ctx: &MvExportContext,
    frame: &mut VideoFrame,
    info: &MbMotionInfo<'_>,
) {
    if !ctx.export_side_data.exports_mvs() {
        warn!("未启用运动向量导出, 请先在导出标志中设置 MVS");
        return;
    }
    if info.motion_val[0].is_none() {
        warn!("运动向量导出失败: 缺少方向 0 的运动向量网格");
        return;
    }
    match MvGridLayout::select(ctx.codec_id, info.mb_width, ctx.width, ctx.height) {
        Ok(layout) if layout.needs_mb_types() && info.mb_types.is_none() => {
            warn!("运动向量导出失败: 缺少宏块类型表 ({})", ctx.codec_id);
            return;
        }
        Err(e) => {
            warn!("运动向量导出失败: {e}");
            return;
        }
        Ok(_) => {}
    }
    export_motion_vectors(ctx, frame, info);
}

fn attach(ctx: &MvExportContext, frame: &mut VideoFrame, buffer: &MvBuffer) -> MvsResult<()> {
    debug!(
        "向第 {} 帧添加 {} 条运动向量",
        ctx.frame_number,
        buffer.len()
    );
    let written = {
        let sd = frame.new_side_data(SideDataType::MotionVectors, buffer.byte_len())?;
        buffer.write_to(&mut sd.data)
    };
    if written.is_err() {
        // 不留下未写完的附加数据
        frame.side_data.pop();
    }
    written
}
