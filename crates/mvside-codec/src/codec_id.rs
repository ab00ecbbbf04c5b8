//! 编解码器标识符.
//!
//! 对标 FFmpeg 的 `AVCodecID`, 这里只保留会产生运动补偿状态的视频编解码器.

use std::fmt;
use std::str::FromStr;

use mvside_core::MvsError;

/// 编解码器标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// 未知编解码器
    None,
    /// H.264 / AVC / MPEG-4 Part 10
    H264,
    /// H.265 / HEVC / MPEG-H Part 2
    H265,
    /// VP8
    Vp8,
    /// VP9
    Vp9,
    /// AV1 (Alliance for Open Media)
    Av1,
    /// MPEG-1 Video
    Mpeg1Video,
    /// MPEG-2 Video
    Mpeg2Video,
    /// MPEG-4 Part 2 (ASP)
    Mpeg4,
    /// H.263
    H263,
    /// Sorenson Vector Quantizer 3
    Svq3,
    /// SMPTE VC-1
    Vc1,
    /// Theora
    Theora,
}

impl CodecId {
    /// 所有可按名称解析的编解码器
    pub const ALL: [CodecId; 12] = [
        Self::H264,
        Self::H265,
        Self::Vp8,
        Self::Vp9,
        Self::Av1,
        Self::Mpeg1Video,
        Self::Mpeg2Video,
        Self::Mpeg4,
        Self::H263,
        Self::Svq3,
        Self::Vc1,
        Self::Theora,
    ];

    /// 获取编解码器的人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::H264 => "h264",
            Self::H265 => "hevc",
            Self::Vp8 => "vp8",
            Self::Vp9 => "vp9",
            Self::Av1 => "av1",
            Self::Mpeg1Video => "mpeg1video",
            Self::Mpeg2Video => "mpeg2video",
            Self::Mpeg4 => "mpeg4",
            Self::H263 => "h263",
            Self::Svq3 => "svq3",
            Self::Vc1 => "vc1",
            Self::Theora => "theora",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CodecId {
    type Err = MvsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        // 常见别名
        let name = match lower.as_str() {
            "h265" => "hevc",
            "avc" => "h264",
            "mpeg2" => "mpeg2video",
            "mpeg1" => "mpeg1video",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| MvsError::InvalidArgument(format!("未知编解码器: {s}")))
    }
}
