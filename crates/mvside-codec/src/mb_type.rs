//! 宏块类型码.
//!
//! 对标 FFmpeg `mpegutils.h` 中的 `MB_TYPE_*` 位定义. 解码器为每个宏块写入一个
//! 32 位类型码, 描述其预测方式、划分形状与参考列表使用情况.
//! 导出层只读取这些位, 不会修改.

use bitflags::bitflags;

bitflags! {
    /// 宏块类型位掩码
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MbType: u32 {
        /// 帧内 4x4 预测
        const INTRA4X4   = 1 << 0;
        /// 帧内 16x16 预测
        const INTRA16X16 = 1 << 1;
        /// PCM 宏块
        const INTRA_PCM  = 1 << 2;
        /// 整宏块 16x16 划分
        const TYPE_16X16 = 1 << 3;
        /// 上下两个 16x8 划分
        const TYPE_16X8  = 1 << 4;
        /// 左右两个 8x16 划分
        const TYPE_8X16  = 1 << 5;
        /// 四个 8x8 划分
        const TYPE_8X8   = 1 << 6;
        /// 场宏块对 (隔行)
        const INTERLACED = 1 << 7;
        /// 直接预测 (B 帧)
        const DIRECT2    = 1 << 8;
        /// AC 预测
        const ACPRED     = 1 << 9;
        /// 全局运动补偿
        const GMC        = 1 << 10;
        /// 跳过宏块
        const SKIP       = 1 << 11;
        /// 划分 0 使用列表 0
        const P0L0       = 1 << 12;
        /// 划分 1 使用列表 0
        const P1L0       = 1 << 13;
        /// 划分 0 使用列表 1
        const P0L1       = 1 << 14;
        /// 划分 1 使用列表 1
        const P1L1       = 1 << 15;
        /// 携带量化参数更新
        const QUANT      = 1 << 16;

        /// 使用参考列表 0 (前向)
        const L0 = Self::P0L0.bits() | Self::P1L0.bits();
        /// 使用参考列表 1 (后向)
        const L1 = Self::P0L1.bits() | Self::P1L1.bits();
        /// 使用两个参考列表 (双向)
        const L0L1 = Self::L0.bits() | Self::L1.bits();

        // 解码器可能写入其他私有位, 原样保留
        const _ = !0;
    }
}

impl MbType {
    /// 从解码器写入的原始类型码构造, 保留所有位
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }

    /// 是否为 8x8 划分
    pub const fn is_8x8(&self) -> bool {
        self.contains(Self::TYPE_8X8)
    }

    /// 是否为 16x8 划分
    pub const fn is_16x8(&self) -> bool {
        self.contains(Self::TYPE_16X8)
    }

    /// 是否为 8x16 划分
    pub const fn is_8x16(&self) -> bool {
        self.contains(Self::TYPE_8X16)
    }

    /// 是否为场宏块对
    pub const fn is_interlaced(&self) -> bool {
        self.contains(Self::INTERLACED)
    }

    /// 是否使用指定方向的参考列表
    ///
    /// `direction` 为 0 (列表 0) 或 1 (列表 1), 其余值返回 false.
    pub const fn uses_list(&self, direction: usize) -> bool {
        match direction {
            0 => self.intersects(Self::L0),
            1 => self.intersects(Self::L1),
            _ => false,
        }
    }
}
