use crate::disk::{
    block_device::{BlockDevice, RangeError},
    types::{Bit, Snapshot},
};

/// 内存中的虚拟磁盘，每个比特用一个 bool 表示
#[derive(Debug, Clone)]
pub struct MemDisk {
    bits: Vec<Bit>,
}

impl MemDisk {
    /// 分配 `capacity_bits` 个比特，全部清零
    pub fn new(capacity_bits: usize) -> Self {
        Self {
            bits: vec![false; capacity_bits],
        }
    }
}

impl BlockDevice for MemDisk {
    fn capacity_bits(&self) -> usize {
        self.bits.len()
    }

    fn read_range(&self, offset: usize, count: usize) -> Result<Vec<Bit>, RangeError> {
        self.check_range(offset, count)?;
        Ok(self.bits[offset..offset + count].to_vec())
    }

    fn write_range(&mut self, offset: usize, bits: &[Bit]) -> Result<(), RangeError> {
        self.check_range(offset, bits.len())?;
        self.bits[offset..offset + bits.len()].copy_from_slice(bits);
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        self.bits.clone()
    }
}
