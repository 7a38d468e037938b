use mini_fat::{
    fs::fat::FatEntry, BlockDevice, FileSystem, FileSystemError, FsConfig, MemDisk,
};

fn fs() -> FileSystem {
    FileSystem::new(256, 8).unwrap()
}

fn non_free(fs: &FileSystem) -> usize {
    fs.fat()
        .entries()
        .iter()
        .filter(|e| **e != FatEntry::Free)
        .count()
}

#[test]
fn create_then_read_round_trips() {
    let mut fs = FileSystem::new(1024, 16).unwrap();
    let contents = ["Hi", "x", "Hello World!", "héllo ✓", "odd", ""];
    for (i, content) in contents.iter().enumerate() {
        let name = format!("file{}", i);
        fs.create(&name, content).unwrap();
        assert_eq!(fs.read(&name).unwrap(), *content);
    }
}

#[test]
fn space_is_accounted_per_block() {
    let mut fs = fs();
    fs.create("seed", "abc").unwrap();
    let before = non_free(&fs);

    // 5 字节 = 40 比特 = 5 块
    fs.create("five", "12345").unwrap();
    assert_eq!(non_free(&fs), before + 5);

    let chain = fs.chain("five").unwrap();
    fs.delete("five").unwrap();
    assert_eq!(non_free(&fs), before);

    let snapshot = fs.snapshot();
    for block in chain {
        assert!(snapshot[block * 8..(block + 1) * 8].iter().all(|b| !b));
    }
}

#[test]
fn names_must_be_unique_and_present() {
    let mut fs = fs();
    fs.create("a", "1").unwrap();

    assert!(matches!(
        fs.create("a", "2"),
        Err(FileSystemError::AlreadyExists(_))
    ));
    assert!(matches!(fs.read("b"), Err(FileSystemError::NotFound(_))));
    assert!(matches!(
        fs.update("b", "x"),
        Err(FileSystemError::NotFound(_))
    ));
    assert!(matches!(fs.delete("b"), Err(FileSystemError::NotFound(_))));

    fs.delete("a").unwrap();
    assert!(matches!(fs.delete("a"), Err(FileSystemError::NotFound(_))));
}

#[test]
fn free_blocks_are_found_lowest_first() {
    let mut fs = fs();
    fs.create("a", "aa").unwrap(); // 0, 1
    fs.create("b", "bbb").unwrap(); // 2, 3, 4
    fs.create("c", "c").unwrap(); // 5
    fs.delete("b").unwrap();

    assert_eq!(fs.fat().find_free_blocks(4).unwrap(), vec![2, 3, 4, 6]);
    assert_eq!(fs.fat().find_free_blocks(4).unwrap(), vec![2, 3, 4, 6]);

    fs.create("d", "dddd").unwrap();
    assert_eq!(fs.chain("d").unwrap(), vec![2, 3, 4, 6]);
    assert_eq!(fs.read("d").unwrap(), "dddd");
}

#[test]
fn disk_full_leaves_everything_unchanged() {
    let mut fs = FileSystem::new(64, 8).unwrap();
    fs.create("a", "123456").unwrap();
    let entries = fs.fat().entries().to_vec();
    let snapshot = fs.snapshot();

    let err = fs.create("b", "xyz").unwrap_err();
    assert!(matches!(
        err,
        FileSystemError::DiskFull {
            requested: 3,
            available: 2
        }
    ));
    assert_eq!(fs.fat().entries(), &entries[..]);
    assert_eq!(fs.snapshot(), snapshot);
    assert_eq!(fs.list(), vec!["a"]);
}

#[test]
fn listing_follows_creation_order() {
    let mut fs = fs();
    for name in ["a", "b", "c"] {
        fs.create(name, "z").unwrap();
    }
    assert_eq!(fs.list(), vec!["a", "b", "c"]);

    fs.delete("b").unwrap();
    assert_eq!(fs.list(), vec!["a", "c"]);
}

#[test]
fn two_character_file_on_a_256_bit_disk() {
    let mut fs = fs();
    assert_eq!(fs.block_count(), 32);

    let free_before = fs.usage().free_blocks;
    fs.create("f.txt", "Hi").unwrap();
    assert_eq!(fs.usage().free_blocks, free_before - 2);
    assert_eq!(fs.read("f.txt").unwrap(), "Hi");

    let chain = fs.chain("f.txt").unwrap();
    assert_eq!(chain, vec![0, 1]);

    let snapshot = fs.delete("f.txt").unwrap();
    assert_eq!(fs.usage().free_blocks, free_before);
    assert!(snapshot[..16].iter().all(|b| !b));
    for block in chain {
        assert_eq!(fs.fat().entry(block), Some(FatEntry::Free));
    }
    assert!(fs.list().is_empty());
}

#[test]
fn failed_update_loses_the_file() {
    let mut fs = fs();
    // 31 字节占满 31 块，只剩 1 块
    fs.create("filler", &"f".repeat(31)).unwrap();
    assert_eq!(fs.usage().free_blocks, 1);

    fs.create("x", "A").unwrap();
    assert_eq!(fs.usage().free_blocks, 0);

    let err = fs.update("x", "needs-3-blocks-content").unwrap_err();
    assert!(matches!(err, FileSystemError::DiskFull { .. }));

    assert!(matches!(fs.read("x"), Err(FileSystemError::NotFound(_))));
    assert_eq!(fs.list(), vec!["filler"]);
    // 旧块已释放并清零
    assert_eq!(fs.usage().free_blocks, 1);
    assert!(fs.snapshot()[31 * 8..].iter().all(|b| !b));
    assert_eq!(fs.read("filler").unwrap(), "f".repeat(31));
}

#[test]
fn mutations_return_the_current_disk() {
    let mut fs = fs();
    let created = fs.create("a", "Hi").unwrap();
    assert_eq!(created, fs.snapshot());
    let updated = fs.update("a", "Yo").unwrap();
    assert_eq!(updated, fs.snapshot());
    assert_ne!(created, updated);
}

#[test]
fn runs_on_any_block_device() {
    let mut disk = MemDisk::new(128);
    disk.write_range(0, &[true; 40]).unwrap();

    // 设备上的旧数据在挂载时清零，与全空闲的 FAT 一致
    let mut fs = FileSystem::with_device(disk, 32).unwrap();
    assert_eq!(fs.block_count(), 4);
    assert_eq!(fs.usage().free_blocks, 4);
    assert!(fs.snapshot().iter().all(|b| !b));

    // 不满一块的文件，尾部补齐仍然是 0
    let snapshot = fs.create("note", "ab").unwrap();
    assert_eq!(fs.read("note").unwrap(), "ab");
    assert!(snapshot[16..].iter().all(|b| !b));

    assert!(matches!(
        FileSystem::with_device(MemDisk::new(100), 32),
        Err(FileSystemError::Config(_))
    ));
}

#[test]
fn config_drives_geometry() {
    let fs = FileSystem::from_config(&FsConfig::new(512, 16)).unwrap();
    assert_eq!(fs.block_count(), 32);
    assert_eq!(fs.block_size(), 16);
    assert!(FileSystem::from_config(&FsConfig::new(512, 0)).is_err());
}
