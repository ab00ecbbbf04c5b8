//! 解码后的视频帧与帧附加数据 (side data).
//!
//! 对标 FFmpeg 的 `AVFrame` / `AVFrameSideData`. 这里只保留运动向量导出需要的
//! 帧属性; 像素平面由解码器管理, 不在本 crate 范围内.

use std::fmt;

use mvside_core::{MvsError, MvsResult};

use crate::motion_vector::MotionVector;

/// 附加数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SideDataType {
    /// 运动向量数组, 元素布局见 [`MotionVector`]
    MotionVectors,
    /// 视频编码参数
    VideoEncParams,
    /// 胶片颗粒参数
    FilmGrainParams,
}

impl SideDataType {
    /// 附加数据的可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MotionVectors => "Motion vectors",
            Self::VideoEncParams => "Video encoding parameters",
            Self::FilmGrainParams => "Film grain parameters",
        }
    }
}

impl fmt::Display for SideDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 帧附加数据
///
/// 一段归帧所有的字节区域, 按类型标记. 调用方按类型解析其内容.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSideData {
    /// 数据类型
    pub kind: SideDataType,
    /// 原始字节
    pub data: Vec<u8>,
}

impl FrameSideData {
    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 将内容解析为运动向量数组
    pub fn motion_vectors(&self) -> MvsResult<Vec<MotionVector>> {
        if self.kind != SideDataType::MotionVectors {
            return Err(MvsError::InvalidArgument(format!(
                "附加数据类型为 {}, 不是运动向量",
                self.kind
            )));
        }
        MotionVector::parse_all(&self.data)
    }
}

/// 视频帧
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// 宽度 (像素)
    pub width: u32,
    /// 高度 (像素)
    pub height: u32,
    /// 是否为关键帧
    pub is_keyframe: bool,
    /// 图片类型 (I/P/B 帧)
    pub picture_type: PictureType,
    /// 附加数据, 按挂载顺序排列
    pub side_data: Vec<FrameSideData>,
}

impl VideoFrame {
    /// 创建空的视频帧
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            is_keyframe: false,
            picture_type: PictureType::None,
            side_data: Vec::new(),
        }
    }

    /// 新建一段 `size` 字节的附加数据并挂到帧上
    ///
    /// 内容初始化为 0, 由调用方填充. 内存不足时返回错误, 帧保持不变.
    pub fn new_side_data(
        &mut self,
        kind: SideDataType,
        size: usize,
    ) -> MvsResult<&mut FrameSideData> {
        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|e| {
            MvsError::OutOfMemory(format!("附加数据 {kind} ({size} 字节): {e}"))
        })?;
        data.resize(size, 0);
        self.side_data
            .try_reserve(1)
            .map_err(|e| MvsError::OutOfMemory(format!("附加数据列表: {e}")))?;
        self.side_data.push(FrameSideData { kind, data });
        let last = self.side_data.len() - 1;
        Ok(&mut self.side_data[last])
    }

    /// 查找指定类型的附加数据
    pub fn side_data(&self, kind: SideDataType) -> Option<&FrameSideData> {
        self.side_data.iter().find(|sd| sd.kind == kind)
    }

    /// 移除指定类型的全部附加数据
    pub fn remove_side_data(&mut self, kind: SideDataType) {
        self.side_data.retain(|sd| sd.kind != kind);
    }
}

/// 图片类型 (I/P/B 帧)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PictureType {
    /// 未指定
    #[default]
    None,
    /// I 帧 (关键帧, 帧内编码)
    I,
    /// P 帧 (前向预测)
    P,
    /// B 帧 (双向预测)
    B,
}
