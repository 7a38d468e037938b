use std::{sync::mpsc::Sender, thread, time::Duration};

use log::info;

use crate::fs::{config::FsConfig, error::Result, FileSystem};

/// 启动过程中发给界面的进度消息
#[derive(Debug)]
pub enum BootProgress {
    Step(&'static str),
    Progress(u64),
    Finished(Result<FileSystem>),
}

/// 在后台线程中创建虚拟磁盘并挂载文件系统，通过 `tx` 汇报进度。
///
/// 接收端被丢弃时直接结束，不视为错误。
pub fn perform_disk_initialization(config: FsConfig, tx: Sender<BootProgress>) {
    if tx
        .send(BootProgress::Step("🧠 Initializing virtual disk..."))
        .is_err()
    {
        return;
    }

    if let Err(e) = config.validate() {
        let _ = tx.send(BootProgress::Finished(Err(e)));
        return;
    }

    for i in 0..=50 {
        if tx.send(BootProgress::Progress(i)).is_err() {
            return;
        }
        thread::sleep(Duration::from_millis(4));
    }

    let _ = tx.send(BootProgress::Step("⚙️  Building allocation table..."));

    let fs = FileSystem::from_config(&config);
    if let Ok(fs) = &fs {
        info!(
            "disk ready: {} bits, {} blocks of {} bits",
            config.capacity_bits,
            fs.block_count(),
            fs.block_size()
        );
    }

    for i in 51..=100 {
        if tx.send(BootProgress::Progress(i)).is_err() {
            return;
        }
        thread::sleep(Duration::from_millis(4));
    }

    let _ = tx.send(BootProgress::Finished(fs));
}
