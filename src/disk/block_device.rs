use std::fmt;

use crate::disk::types::{Bit, BlockIndex, Snapshot};

/// 越界访问：`offset + count` 超出了可访问范围（整盘容量或单个块的末尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub offset: usize,
    pub count: usize,
    pub limit: usize, // 可访问范围的上界（比特）
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bit range {}..{} exceeds limit of {} bits",
            self.offset,
            self.offset.saturating_add(self.count),
            self.limit
        )
    }
}

impl std::error::Error for RangeError {}

/// 按比特寻址的定长存储设备
pub trait BlockDevice {
    /// 设备总容量（比特）
    fn capacity_bits(&self) -> usize;

    fn read_range(&self, offset: usize, count: usize) -> Result<Vec<Bit>, RangeError>;

    /// 原地覆盖 `offset` 起的 `bits.len()` 个比特
    fn write_range(&mut self, offset: usize, bits: &[Bit]) -> Result<(), RangeError>;

    /// 整盘拷贝，反映最近一次完成的写入
    fn snapshot(&self) -> Snapshot;

    fn check_range(&self, offset: usize, count: usize) -> Result<(), RangeError> {
        let capacity = self.capacity_bits();
        match offset.checked_add(count) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(RangeError {
                offset,
                count,
                limit: capacity,
            }),
        }
    }

    // 以下按块操作，块大小由调用方（文件系统）决定

    fn read_block(&self, block: BlockIndex, block_size: usize) -> Result<Vec<Bit>, RangeError> {
        self.read_range(block * block_size, block_size)
    }

    fn write_block(
        &mut self,
        block: BlockIndex,
        block_size: usize,
        bits: &[Bit],
    ) -> Result<(), RangeError> {
        let offset = block * block_size;
        // 超出本块的写入会覆盖下一块，直接拒绝
        if bits.len() > block_size {
            return Err(RangeError {
                offset,
                count: bits.len(),
                limit: offset + block_size,
            });
        }
        self.write_range(offset, bits)
    }

    fn zero_block(&mut self, block: BlockIndex, block_size: usize) -> Result<(), RangeError> {
        self.write_range(block * block_size, &vec![false; block_size])
    }
}
