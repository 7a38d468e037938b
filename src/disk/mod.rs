pub mod block_device;
pub mod init;
pub mod mem_disk;
pub mod types;

pub use block_device::{BlockDevice, RangeError};
pub use mem_disk::MemDisk;
pub use types::{Bit, BlockIndex, Snapshot};
