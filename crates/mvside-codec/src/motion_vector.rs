//! 运动向量记录.
//!
//! 对标 FFmpeg 的 `AVMotionVector`. 记录在帧附加数据中按固定的 C 布局
//! 小端序存放, 每条 40 字节:
//!
//! | 偏移 | 字段 | 类型 |
//! |-----:|------|------|
//! | 0 | `source` | i32 |
//! | 4 | `w` / `h` | u8 / u8 |
//! | 6 | `src_x` / `src_y` / `dst_x` / `dst_y` | i16 x 4 |
//! | 16 | `flags` | u64 |
//! | 24 | `motion_x` / `motion_y` | i32 / i32 |
//! | 32 | `motion_scale` | u16 |
//!
//! 其余字节为对齐填充, 恒为 0.

use byteorder::{ByteOrder, LittleEndian};
use mvside_core::{MvsError, MvsResult};

/// 单条运动向量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MotionVector {
    /// 参考方向: -1 表示过去帧 (列表 0), +1 表示未来帧 (列表 1)
    pub source: i32,
    /// 块宽度 (像素)
    pub w: u8,
    /// 块高度 (像素)
    pub h: u8,
    /// 源块位置 (参考帧中)
    pub src_x: i16,
    pub src_y: i16,
    /// 目标块位置 (当前帧中)
    pub dst_x: i16,
    pub dst_y: i16,
    /// 保留标志, 目前恒为 0
    pub flags: u64,
    /// 亚像素单位的运动分量
    pub motion_x: i32,
    pub motion_y: i32,
    /// 亚像素分母 (2 = 半像素, 4 = 1/4 像素)
    pub motion_scale: u16,
}

impl MotionVector {
    /// 序列化后每条记录的字节数
    pub const SIZE: usize = 40;

    /// 按固定布局写入 `out` (长度必须为 [`Self::SIZE`])
    pub fn write_to(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), Self::SIZE);
        out.fill(0);
        LittleEndian::write_i32(&mut out[0..4], self.source);
        out[4] = self.w;
        out[5] = self.h;
        LittleEndian::write_i16(&mut out[6..8], self.src_x);
        LittleEndian::write_i16(&mut out[8..10], self.src_y);
        LittleEndian::write_i16(&mut out[10..12], self.dst_x);
        LittleEndian::write_i16(&mut out[12..14], self.dst_y);
        LittleEndian::write_u64(&mut out[16..24], self.flags);
        LittleEndian::write_i32(&mut out[24..28], self.motion_x);
        LittleEndian::write_i32(&mut out[28..32], self.motion_y);
        LittleEndian::write_u16(&mut out[32..34], self.motion_scale);
    }

    /// 从固定布局读取一条记录 (长度必须为 [`Self::SIZE`])
    pub fn read_from(buf: &[u8]) -> MvsResult<Self> {
        if buf.len() != Self::SIZE {
            return Err(MvsError::InvalidData(format!(
                "运动向量记录长度错误: {} (应为 {})",
                buf.len(),
                Self::SIZE
            )));
        }
        Ok(Self {
            source: LittleEndian::read_i32(&buf[0..4]),
            w: buf[4],
            h: buf[5],
            src_x: LittleEndian::read_i16(&buf[6..8]),
            src_y: LittleEndian::read_i16(&buf[8..10]),
            dst_x: LittleEndian::read_i16(&buf[10..12]),
            dst_y: LittleEndian::read_i16(&buf[12..14]),
            flags: LittleEndian::read_u64(&buf[16..24]),
            motion_x: LittleEndian::read_i32(&buf[24..28]),
            motion_y: LittleEndian::read_i32(&buf[28..32]),
            motion_scale: LittleEndian::read_u16(&buf[32..34]),
        })
    }

    /// 解析一段连续的记录数组
    pub fn parse_all(data: &[u8]) -> MvsResult<Vec<Self>> {
        if data.len() % Self::SIZE != 0 {
            return Err(MvsError::InvalidData(format!(
                "运动向量附加数据长度 {} 不是 {} 的整数倍",
                data.len(),
                Self::SIZE
            )));
        }
        data.chunks_exact(Self::SIZE).map(Self::read_from).collect()
    }
}
