//! 运动向量输出缓冲区.
//!
//! 按最坏情况一次性分配容量, 填充过程中不再增长. 写满容量视为内部错误.

use mvside_core::{MvsError, MvsResult};

use crate::motion_vector::MotionVector;

/// 定长运动向量缓冲区
#[derive(Debug)]
pub struct MvBuffer {
    records: Vec<MotionVector>,
    capacity: usize,
}

impl MvBuffer {
    /// 分配可容纳 `capacity` 条记录的缓冲区, 内存不足时返回错误
    pub fn with_capacity(capacity: usize) -> MvsResult<Self> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(capacity)
            .map_err(|e| MvsError::OutOfMemory(format!("运动向量缓冲区 ({capacity} 条): {e}")))?;
        Ok(Self { records, capacity })
    }

    /// 追加一条记录
    pub fn push(&mut self, mv: MotionVector) -> MvsResult<()> {
        if self.records.len() >= self.capacity {
            return Err(MvsError::Internal(format!(
                "运动向量数超过预分配上限 {}",
                self.capacity
            )));
        }
        self.records.push(mv);
        Ok(())
    }

    /// 已写入的记录数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 预分配容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[MotionVector] {
        &self.records
    }

    /// 序列化后所需字节数
    pub fn byte_len(&self) -> usize {
        self.records.len() * MotionVector::SIZE
    }

    /// 把已写入的记录按固定布局拷贝到 `out` (长度必须等于 [`Self::byte_len`])
    pub fn write_to(&self, out: &mut [u8]) -> MvsResult<()> {
        if out.len() != self.byte_len() {
            return Err(MvsError::InvalidArgument(format!(
                "目标区域 {} 字节, 需要 {} 字节",
                out.len(),
                self.byte_len()
            )));
        }
        for (mv, chunk) in self
            .records
            .iter()
            .zip(out.chunks_exact_mut(MotionVector::SIZE))
        {
            mv.write_to(chunk);
        }
        Ok(())
    }
}
