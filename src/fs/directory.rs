use chrono::{DateTime, Local};
use std::collections::HashMap;

use crate::{
    disk::BlockIndex,
    fs::error::{FileSystemError, Result},
    utils::current_timestamp,
};

/// 一个文件的元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub start_block: Option<BlockIndex>, // 起始块；空文件不占块
    pub length: usize,                   // 写入的内容单元数（字节），不含块内补齐
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

impl FileEntry {
    pub fn new(start_block: Option<BlockIndex>, length: usize) -> Self {
        let now = current_timestamp();
        Self {
            start_block,
            length,
            created: now,
            modified: now,
        }
    }
}

// 一个目录项
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub meta: FileEntry,
}

/// 单层目录：文件名 -> 元数据，保留插入顺序
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: Vec<DirEntry>,
    index_map: HashMap<String, usize>, // name -> entries 索引
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_index_map(&mut self) {
        self.index_map.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.index_map.insert(entry.name.clone(), i);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_map.contains_key(name)
    }

    // 添加目录项
    pub fn insert(&mut self, name: &str, meta: FileEntry) -> Result<()> {
        if self.contains(name) {
            return Err(FileSystemError::AlreadyExists(name.to_string()));
        }
        self.entries.push(DirEntry {
            name: name.to_string(),
            meta,
        });
        self.index_map
            .insert(name.to_string(), self.entries.len() - 1);
        Ok(())
    }

    // 删除目录项，返回其元数据
    pub fn remove(&mut self, name: &str) -> Result<FileEntry> {
        let idx = *self
            .index_map
            .get(name)
            .ok_or_else(|| FileSystemError::NotFound(name.to_string()))?;
        let entry = self.entries.remove(idx);
        self.rebuild_index_map();
        Ok(entry.meta)
    }

    pub fn lookup(&self, name: &str) -> Result<&FileEntry> {
        self.index_map
            .get(name)
            .map(|&idx| &self.entries[idx].meta)
            .ok_or_else(|| FileSystemError::NotFound(name.to_string()))
    }

    /// 按插入顺序列出文件名
    pub fn list_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// 文件个数
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
