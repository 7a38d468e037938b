use log::{debug, info, warn};

use crate::{
    disk::{BlockDevice, BlockIndex, MemDisk, Snapshot},
    fs::{
        config::FsConfig,
        directory::{Directory, FileEntry},
        error::{FileSystemError, Result},
        fat::AllocationTable,
    },
    utils::current_timestamp,
};

pub mod codec;
pub mod config;
pub mod directory;
pub mod error;
pub mod fat;

/// 块使用情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub total_blocks: usize,
    pub used_blocks: usize,
    pub free_blocks: usize,
    pub files: usize,
}

/// 基于 FAT 链式分配的单层文件系统
#[derive(Debug)]
pub struct FileSystem<D: BlockDevice = MemDisk> {
    disk: D,               // 底层磁盘抽象层
    fat: AllocationTable,  // 块分配与链接信息
    directory: Directory,  // 文件名 -> 元数据
    block_size: usize,     // 每块比特数
}

impl FileSystem<MemDisk> {
    /// 在一块全新的内存磁盘上创建文件系统
    pub fn new(capacity_bits: usize, block_size: usize) -> Result<Self> {
        Self::from_config(&FsConfig::new(capacity_bits, block_size))
    }

    pub fn from_config(config: &FsConfig) -> Result<Self> {
        config.validate()?;
        FileSystem::with_device(MemDisk::new(config.capacity_bits), config.block_size)
    }
}

impl<D: BlockDevice> FileSystem<D> {
    /// 在给定设备上创建文件系统，设备原有内容全部清零
    pub fn with_device(mut disk: D, block_size: usize) -> Result<Self> {
        let config = FsConfig::new(disk.capacity_bits(), block_size);
        config.validate()?;

        // 所有块在 FAT 中都是空闲的，磁盘上也不能留下旧数据
        disk.write_range(0, &vec![false; config.capacity_bits])?;

        debug!(
            "mounting {} bits as {} blocks of {} bits",
            config.capacity_bits,
            config.block_count(),
            block_size
        );
        Ok(Self {
            disk,
            fat: AllocationTable::new(config.block_count()),
            directory: Directory::new(),
            block_size,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn block_count(&self) -> usize {
        self.fat.block_count()
    }

    pub fn capacity_bits(&self) -> usize {
        self.disk.capacity_bits()
    }

    pub fn fat(&self) -> &AllocationTable {
        &self.fat
    }

    pub fn snapshot(&self) -> Snapshot {
        self.disk.snapshot()
    }

    pub fn usage(&self) -> Usage {
        Usage {
            total_blocks: self.fat.block_count(),
            used_blocks: self.fat.used_count(),
            free_blocks: self.fat.free_count(),
            files: self.directory.count(),
        }
    }

    /// 创建文件并写入内容，返回写入后的磁盘快照
    pub fn create(&mut self, name: &str, content: &str) -> Result<Snapshot> {
        // 先查重，重名时不占用任何空间
        if self.directory.contains(name) {
            return Err(FileSystemError::AlreadyExists(name.to_string()));
        }

        let start_block = self.allocate(content.as_bytes())?;
        self.directory
            .insert(name, FileEntry::new(start_block, content.len()))?;

        info!("created '{}' ({} bytes)", name, content.len());
        Ok(self.disk.snapshot())
    }

    /// 读出文件内容，按记录的长度截断块内补齐的部分
    pub fn read(&self, name: &str) -> Result<String> {
        let meta = self.directory.lookup(name)?;

        let mut bits = Vec::new();
        if let Some(start) = meta.start_block {
            for block in self.fat.follow_chain(start) {
                bits.extend(self.disk.read_block(block?, self.block_size)?);
            }
        }

        let mut bytes = codec::decode(&bits);
        bytes.truncate(meta.length);
        debug!("read '{}' ({} bytes)", name, bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// 先删除旧文件，再按新内容重新创建。
    ///
    /// 新内容分配失败时旧文件已经释放，不会回滚：文件就此消失。
    pub fn update(&mut self, name: &str, content: &str) -> Result<Snapshot> {
        let old = self.release(name)?;

        let start_block = self.allocate(content.as_bytes()).map_err(|e| {
            warn!("update of '{}' failed after release, file lost: {}", name, e);
            e
        })?;
        self.directory.insert(
            name,
            FileEntry {
                start_block,
                length: content.len(),
                created: old.created,
                modified: current_timestamp(),
            },
        )?;

        info!("updated '{}' ({} bytes)", name, content.len());
        Ok(self.disk.snapshot())
    }

    /// 删除文件，释放并清零它占用的所有块
    pub fn delete(&mut self, name: &str) -> Result<Snapshot> {
        self.release(name)?;
        info!("deleted '{}'", name);
        Ok(self.disk.snapshot())
    }

    pub fn list(&self) -> Vec<String> {
        self.directory.list_names()
    }

    pub fn stat(&self, name: &str) -> Result<FileEntry> {
        self.directory.lookup(name).cloned()
    }

    /// 文件占用的块号，按链顺序
    pub fn chain(&self, name: &str) -> Result<Vec<BlockIndex>> {
        match self.directory.lookup(name)?.start_block {
            Some(start) => self.fat.follow_chain(start).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// 按首次适配分配块、写入内容并链接，返回起始块
    fn allocate(&mut self, content: &[u8]) -> Result<Option<BlockIndex>> {
        let bits = codec::encode(content);
        let required = bits.len().div_ceil(self.block_size);
        let blocks = self.fat.find_free_blocks(required)?;

        // 最后一块未写满的部分保持原值（已释放的块都被清零过）
        for (chunk, &block) in bits.chunks(self.block_size).zip(&blocks) {
            self.disk.write_block(block, self.block_size, chunk)?;
        }
        if !blocks.is_empty() {
            self.fat.link_chain(&blocks);
        }
        Ok(blocks.first().copied())
    }

    /// 释放文件的块链并移除目录项。
    ///
    /// 链损坏时已走过的块保持释放，目录项同样移除，再返回错误。
    fn release(&mut self, name: &str) -> Result<FileEntry> {
        let meta = self.directory.lookup(name)?.clone();

        let freed = match meta.start_block {
            Some(start) => {
                let block_size = self.block_size;
                let disk = &mut self.disk;
                self.fat.free_chain(start, |block| {
                    disk.zero_block(block, block_size)?;
                    Ok(())
                })
            }
            None => Ok(0),
        };

        self.directory.remove(name)?;
        let freed = freed?;
        debug!("released '{}' ({} blocks)", name, freed);
        Ok(meta)
    }
}
