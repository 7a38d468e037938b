//! FAT（文件分配表）
//!
//! 每个块对应一个表项，记录该块空闲、是链尾，还是指向链中的下一个块。
//! 文件的数据块因此不必连续，沿表项即可从起始块走完整条链。

use log::{debug, warn};

use crate::{
    disk::BlockIndex,
    fs::error::{FileSystemError, Result},
};

/// 单个块的分配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatEntry {
    Free,
    EndOfChain,
    Next(BlockIndex),
}

#[derive(Debug, Clone)]
pub struct AllocationTable {
    entries: Vec<FatEntry>,
    free_blocks: usize, // 当前空闲块数
}

impl AllocationTable {
    /// 创建一个所有块都空闲的表
    pub fn new(block_count: usize) -> Self {
        Self {
            entries: vec![FatEntry::Free; block_count],
            free_blocks: block_count,
        }
    }

    pub fn block_count(&self) -> usize {
        self.entries.len()
    }

    pub fn free_count(&self) -> usize {
        self.free_blocks
    }

    pub fn used_count(&self) -> usize {
        self.entries.len() - self.free_blocks
    }

    pub fn entry(&self, block: BlockIndex) -> Option<FatEntry> {
        self.entries.get(block).copied()
    }

    pub fn entries(&self) -> &[FatEntry] {
        &self.entries
    }

    /// 从 0 号块开始升序扫描，返回最靠前的 `n` 个空闲块（首次适配）。
    ///
    /// 只查找不占用；空闲块不足时返回 `DiskFull`，表保持不变。
    pub fn find_free_blocks(&self, n: usize) -> Result<Vec<BlockIndex>> {
        let found: Vec<BlockIndex> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| **entry == FatEntry::Free)
            .map(|(index, _)| index)
            .take(n)
            .collect();

        if found.len() < n {
            warn!("need {} free blocks, only {} available", n, found.len());
            return Err(FileSystemError::DiskFull {
                requested: n,
                available: found.len(),
            });
        }
        Ok(found)
    }

    /// 按给定顺序把块串成一条链，最后一块标记为链尾
    pub fn link_chain(&mut self, blocks: &[BlockIndex]) {
        for (i, &block) in blocks.iter().enumerate() {
            let entry = match blocks.get(i + 1) {
                Some(&next) => FatEntry::Next(next),
                None => FatEntry::EndOfChain,
            };
            self.set(block, entry);
        }
        debug!("linked chain {:?}", blocks);
    }

    /// 惰性遍历从 `start` 开始的链
    pub fn follow_chain(&self, start: BlockIndex) -> Chain<'_> {
        Chain {
            fat: self,
            next: Some(start),
            visited: vec![false; self.entries.len()],
        }
    }

    /// 释放从 `start` 开始的整条链，每释放一块就调用一次 `on_free`。
    ///
    /// 中途发现损坏时，之前已经走过的块仍保持释放状态，再把错误返回给调用方。
    pub fn free_chain<F>(&mut self, start: BlockIndex, mut on_free: F) -> Result<usize>
    where
        F: FnMut(BlockIndex) -> Result<()>,
    {
        let mut current = start;
        let mut freed = 0;
        loop {
            let entry = self.entry(current).ok_or_else(|| {
                warn!("chain from {} leaves the table at {}", start, current);
                FileSystemError::CorruptChain {
                    block: current,
                    reason: "link points outside the table",
                }
            })?;

            // 已释放的块再次出现，说明链上有环或者链接到了空闲块
            if entry == FatEntry::Free {
                warn!("chain from {} reaches free block {}", start, current);
                return Err(FileSystemError::CorruptChain {
                    block: current,
                    reason: "chain reaches a free block",
                });
            }

            self.set(current, FatEntry::Free);
            freed += 1;
            on_free(current)?;

            match entry {
                FatEntry::Next(next) => current = next,
                _ => break,
            }
        }
        debug!("freed {} blocks starting at {}", freed, start);
        Ok(freed)
    }

    fn set(&mut self, block: BlockIndex, entry: FatEntry) {
        let old = std::mem::replace(&mut self.entries[block], entry);
        match (old, entry) {
            (FatEntry::Free, FatEntry::Free) => {}
            (FatEntry::Free, _) => self.free_blocks -= 1,
            (_, FatEntry::Free) => self.free_blocks += 1,
            _ => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn set_entry(&mut self, block: BlockIndex, entry: FatEntry) {
        self.set(block, entry);
    }
}

/// 链上块号的惰性序列，遇到环或越界链接时产出一次错误后结束
#[derive(Debug)]
pub struct Chain<'a> {
    fat: &'a AllocationTable,
    next: Option<BlockIndex>,
    visited: Vec<bool>,
}

impl Iterator for Chain<'_> {
    type Item = Result<BlockIndex>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let corrupt = |reason: &'static str| {
            warn!("corrupt chain at block {}: {}", current, reason);
            Some(Err(FileSystemError::CorruptChain {
                block: current,
                reason,
            }))
        };

        let entry = match self.fat.entry(current) {
            Some(entry) => entry,
            None => return corrupt("link points outside the table"),
        };
        if self.visited[current] {
            return corrupt("cycle detected");
        }
        self.visited[current] = true;

        match entry {
            FatEntry::Next(next) => self.next = Some(next),
            FatEntry::EndOfChain => {}
            FatEntry::Free => return corrupt("chain reaches a free block"),
        }
        Some(Ok(current))
    }
}
