/// 块在磁盘上的编号，从 0 开始
pub type BlockIndex = usize;

/// 磁盘上的一个比特，`true` 表示已写入 1
pub type Bit = bool;

/// 磁盘某一时刻的完整拷贝，长度恒等于容量（单位：比特）
pub type Snapshot = Vec<Bit>;
