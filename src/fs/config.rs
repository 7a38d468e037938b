use crate::fs::error::{FileSystemError, Result};

/// 默认磁盘容量：256 比特
pub const DEFAULT_CAPACITY_BITS: usize = 256;

/// 默认块大小：8 比特，即 32 个块
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// 每个内容单元（一个字节）编码后的比特数
pub const BITS_PER_UNIT: usize = 8;

/// 磁盘几何参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    pub capacity_bits: usize,
    pub block_size: usize,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            capacity_bits: DEFAULT_CAPACITY_BITS,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl FsConfig {
    pub fn new(capacity_bits: usize, block_size: usize) -> Self {
        Self {
            capacity_bits,
            block_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity_bits == 0 {
            return Err(FileSystemError::Config(
                "disk capacity must be positive".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(FileSystemError::Config(
                "block size must be positive".to_string(),
            ));
        }
        if self.capacity_bits % self.block_size != 0 {
            return Err(FileSystemError::Config(format!(
                "disk capacity {} is not a multiple of block size {}",
                self.capacity_bits, self.block_size
            )));
        }
        Ok(())
    }

    pub fn block_count(&self) -> usize {
        self.capacity_bits / self.block_size
    }
}
