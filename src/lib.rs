//! 基于 FAT 链式分配的单层文件系统模拟器。
//!
//! 磁盘是一段按比特寻址的内存（[`disk::MemDisk`]），按固定块大小切分；
//! [`fs::fat::AllocationTable`] 记录每个块的链接关系，
//! [`fs::FileSystem`] 在其上实现创建、读取、更新、删除与列出文件。

pub mod disk;
pub mod fs;
pub mod logger;
pub mod utils;

pub use disk::{BlockDevice, MemDisk};
pub use fs::{config::FsConfig, error::FileSystemError, FileSystem};
