use std::fmt;

use crate::disk::{BlockIndex, RangeError};

/// 文件系统错误类型
#[derive(Debug)]
pub enum FileSystemError {
    OutOfRange(RangeError), // 底层设备越界访问
    DiskFull {
        requested: usize, // 需要的块数
        available: usize, // 实际空闲块数
    },
    NotFound(String),      // 文件不存在
    AlreadyExists(String), // 文件已存在
    CorruptChain {
        block: BlockIndex, // 发现问题的块
        reason: &'static str,
    },
    Config(String), // 构造参数非法
}

impl From<RangeError> for FileSystemError {
    fn from(e: RangeError) -> Self {
        FileSystemError::OutOfRange(e)
    }
}

// 实现 Display trait，用于打印错误信息
impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(e) => write!(f, "Disk access out of range: {}", e),
            Self::DiskFull {
                requested,
                available,
            } => write!(
                f,
                "Disk is full: {} blocks needed, {} free",
                requested, available
            ),
            Self::NotFound(name) => write!(f, "File not found: {}", name),
            Self::AlreadyExists(name) => write!(f, "File already exists: {}", name),
            Self::CorruptChain { block, reason } => {
                write!(f, "Corrupt block chain at block {}: {}", block, reason)
            }
            Self::Config(desc) => write!(f, "Invalid configuration: {}", desc),
        }
    }
}

// 支持链式错误，方便追踪底层原因
impl std::error::Error for FileSystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfRange(e) => Some(e),
            _ => None,
        }
    }
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FileSystemError>;
