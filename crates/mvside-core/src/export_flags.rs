//! 解码器附加数据导出标志.
//!
//! 对标 FFmpeg 的 `AV_CODEC_EXPORT_DATA_*`, 由调用方在解码上下文中设置,
//! 决定解码后的帧上附带哪些附加数据.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// 附加数据导出位掩码
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExportSideData: u32 {
        /// 导出运动向量
        const MVS              = 1 << 0;
        /// 导出生产者参考时间 (保留)
        const PRFT             = 1 << 1;
        /// 导出视频编码参数 (保留)
        const VIDEO_ENC_PARAMS = 1 << 2;
        /// 导出胶片颗粒参数 (保留)
        const FILM_GRAIN       = 1 << 3;
    }
}

impl ExportSideData {
    /// 是否启用运动向量导出
    pub const fn exports_mvs(&self) -> bool {
        self.contains(Self::MVS)
    }
}

impl fmt::Display for ExportSideData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{}", name.to_ascii_lowercase())?;
            first = false;
        }
        Ok(())
    }
}
